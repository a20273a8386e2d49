//! BDD step definitions for photo captions

use cucumber::{given, then, when};

use telegram_notifier::caption::build_caption;

use crate::world::NotifierWorld;

#[given(expr = "the alert message is {int} characters long")]
fn message_length(world: &mut NotifierWorld, length: usize) {
    world.context.rule.message = "m".repeat(length);
}

#[when("the caption is built")]
fn caption_built(world: &mut NotifierWorld) {
    world.caption = Some(build_caption(&world.context));
}

fn caption(world: &NotifierWorld) -> &str {
    world.caption.as_deref().expect("no caption built")
}

#[then(expr = "the caption should be {int} characters long")]
fn caption_length(world: &mut NotifierWorld, length: usize) {
    assert_eq!(caption(world).chars().count(), length);
}

#[then(expr = "the caption should be the first {int} characters of the base caption")]
fn caption_is_prefix(world: &mut NotifierWorld, length: usize) {
    let base = format!(
        "{}\nMessage: {}\n",
        world.context.notification_title(),
        world.context.rule.message
    );
    let expected: String = base.chars().take(length).collect();
    assert_eq!(caption(world), expected);
}

#[then(expr = "the caption should contain {string}")]
fn caption_contains(world: &mut NotifierWorld, text: String) {
    assert!(caption(world).contains(&text), "{}", caption(world));
}

#[then(expr = "the caption should not contain {string}")]
fn caption_lacks(world: &mut NotifierWorld, text: String) {
    assert!(!caption(world).contains(&text), "{}", caption(world));
}

#[then(expr = "the caption should end with the metrics block")]
fn caption_ends_with_metrics(world: &mut NotifierWorld) {
    let block: String = world
        .context
        .eval_matches
        .iter()
        .take(5)
        .map(|m| format!("\n{}: {}", m.metric, m.value))
        .collect();
    assert!(caption(world).ends_with(&format!("\nMetrics:{}", block)));
}
