//! BDD step definitions for delivery mode selection

use std::path::PathBuf;
use std::sync::Arc;

use cucumber::gherkin::Step;
use cucumber::{given, then, when};

use telegram_notifier::io::WebhookSender;
use telegram_notifier::{
    AlertState, EvalMatch, Notifier, NotifierError, OutboundRequest, Rule, TelegramConfig,
    TelegramNotifier,
};

use crate::world::NotifierWorld;

/// Sender that accepts every request
struct AcceptingSender;

#[async_trait::async_trait]
impl WebhookSender for AcceptingSender {
    async fn send(&self, _request: &OutboundRequest) -> telegram_notifier::Result<()> {
        Ok(())
    }
}

/// Sender that simulates the Bot API rejecting the request
struct RejectingSender;

#[async_trait::async_trait]
impl WebhookSender for RejectingSender {
    async fn send(&self, _request: &OutboundRequest) -> telegram_notifier::Result<()> {
        Err(NotifierError::Dispatch(
            "POST returned status 400: Bad Request: chat not found".to_string(),
        ))
    }
}

fn notifier(world: &NotifierWorld, sender: Arc<dyn WebhookSender>) -> TelegramNotifier {
    let config = TelegramConfig {
        bot_token: "123:abc".to_string(),
        chat_id: "-1001".to_string(),
        upload_image: world.upload_image,
    };
    TelegramNotifier::new("ops", config, sender).expect("valid notifier config")
}

#[given("a Telegram notifier with image upload enabled")]
fn upload_enabled(world: &mut NotifierWorld) {
    world.upload_image = true;
}

#[given("a Telegram notifier with image upload disabled")]
fn upload_disabled(world: &mut NotifierWorld) {
    world.upload_image = false;
}

#[given(expr = "an alert {string} with message {string}")]
fn alert(world: &mut NotifierWorld, name: String, message: String) {
    world.context.rule = Rule {
        id: 1,
        name,
        message,
        state: AlertState::Alerting,
    };
    world.context.prev_alert_state = AlertState::Ok;
}

#[given(expr = "the alert has metric {string} with value {string}")]
fn alert_metric(world: &mut NotifierWorld, metric: String, value: String) {
    world.context.eval_matches.push(EvalMatch::new(metric, value));
}

#[given(expr = "the alert has {int} metrics")]
fn alert_metrics(world: &mut NotifierWorld, count: usize) {
    for i in 0..count {
        world
            .context
            .eval_matches
            .push(EvalMatch::new(format!("series{i}"), i.to_string()));
    }
}

#[given("the alert has a rendered image on disk")]
fn rendered_image(world: &mut NotifierWorld) {
    let path = world.write_image("panel.png");
    world.context.image_on_disk_path = Some(path);
}

#[given("the alert has a rendered image path that does not exist")]
fn missing_image(world: &mut NotifierWorld) {
    world.context.image_on_disk_path = Some(PathBuf::from("/nonexistent/render/panel.png"));
}

#[given(expr = "the alert has a public image URL {string}")]
fn public_image_url(world: &mut NotifierWorld, url: String) {
    world.context.image_public_url = Some(url);
}

#[given(expr = "the alert has rule URL {string}")]
fn rule_url(world: &mut NotifierWorld, url: String) {
    world.context.rule_url = Some(url);
}

#[when("the notification request is built")]
async fn build_request(world: &mut NotifierWorld) {
    let notifier = notifier(world, Arc::new(AcceptingSender));
    world.request = Some(notifier.select_and_build(&world.context).await);
}

#[when("the notification is sent")]
async fn send_notification(world: &mut NotifierWorld) {
    let notifier = notifier(world, Arc::new(AcceptingSender));
    world.notification_result = Some(notifier.notify(&world.context).await);
}

#[when("the notification is sent to a chat that rejects it")]
async fn send_rejected(world: &mut NotifierWorld) {
    let notifier = notifier(world, Arc::new(RejectingSender));
    world.notification_result = Some(notifier.notify(&world.context).await);
}

#[then(expr = "the request should use the {string} method")]
fn request_method(world: &mut NotifierWorld, method: String) {
    let request = world.request();
    assert_eq!(request.method(), "POST");
    assert_eq!(request.api_method(), method);
    assert_eq!(
        request.url(),
        format!("https://api.telegram.org/bot123:abc/{}", method)
    );
}

#[then(expr = "the request should contain field {string} with value {string}")]
fn request_field(world: &mut NotifierWorld, name: String, value: String) {
    let expected = format!("name=\"{}\"\r\n\r\n{}\r\n", name, value);
    assert!(world.body().contains(&expected), "{}", world.body());
}

#[then(expr = "the request should not contain field {string}")]
fn request_without_field(world: &mut NotifierWorld, name: String) {
    assert!(!world.body().contains(&format!("name=\"{}\"", name)));
}

#[then("the request should attach the image")]
fn request_attaches_image(world: &mut NotifierWorld) {
    let body = world.body();
    assert!(body.contains("name=\"photo\"; filename=\"panel.png\""));
    assert!(body.contains("rendered-panel"));
}

#[then("the text field should be:")]
fn text_field_is(world: &mut NotifierWorld, step: &Step) {
    let expected = step
        .docstring
        .as_deref()
        .expect("step needs a docstring")
        .trim_matches('\n');
    let expected = format!("name=\"text\"\r\n\r\n{}\r\n", expected);
    assert!(world.body().contains(&expected), "{}", world.body());
}

#[then(expr = "the text should list {int} metrics")]
fn text_lists_metrics(world: &mut NotifierWorld, count: usize) {
    let body = world.body();
    let listed = (0..10)
        .filter(|i| body.contains(&format!("\nseries{i}: {i}")))
        .count();
    assert_eq!(listed, count);
}

#[then("the notification should succeed")]
fn notification_succeeds(world: &mut NotifierWorld) {
    let result = world.notification_result.as_ref().expect("no result");
    result.as_ref().unwrap();
}

#[then(expr = "the notification should fail with an error containing {string}")]
fn notification_fails(world: &mut NotifierWorld, text: String) {
    let result = world.notification_result.as_ref().expect("no result");
    let err = result.as_ref().unwrap_err();
    assert!(err.to_string().contains(&text), "{err}");
}
