//! Text message composition for link-style delivery

use crate::context::{EvalContext, EvalMatch};

/// Highest match index rendered into a notification. Indices `0..=4` are
/// included, so at most five metrics are shown.
pub const METRIC_FIELD_LIMIT: usize = 4;

/// Render the leading metric matches as `\n{metric}: {value}` lines.
///
/// Returns an empty string when there are no matches.
pub fn render_metrics(matches: &[EvalMatch]) -> String {
    let mut block = String::new();
    for (index, eval_match) in matches.iter().enumerate() {
        if index > METRIC_FIELD_LIMIT {
            break;
        }
        block.push_str(&format!("\n{}: {}", eval_match.metric, eval_match.value));
    }
    block
}

/// Build the HTML-flavoured body of a `sendMessage` notification.
///
/// The result has no length bound. Markup is passed through as-is; the
/// receiving client is expected to be lenient about it.
pub fn build_message(context: &EvalContext) -> String {
    let mut message = format!(
        "<b>{}</b>\nState: {}\nMessage: {}\n",
        context.notification_title(),
        context.rule.name,
        context.rule.message
    );

    if let Some(url) = context.rule_url() {
        message.push_str(&format!("URL: {}\n", url));
    }

    if let Some(image_url) = context.public_image_url() {
        message.push_str(&format!("Image: {}\n", image_url));
    }

    let metrics = render_metrics(&context.eval_matches);
    if !metrics.is_empty() {
        message.push_str(&format!("\n<i>Metrics:</i>{}", metrics));
    }

    message
}
