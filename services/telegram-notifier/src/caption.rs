//! Photo caption construction for inline-image delivery
//!
//! Telegram rejects photo captions above a fixed size, so the caption is
//! built from a base line plus optional sections that are appended only
//! while they fit.

use crate::context::EvalContext;
use crate::message::render_metrics;

/// Maximum caption length, in characters.
pub const CAPTION_LIMIT: usize = 200;

/// Build the caption for a `sendPhoto` notification.
///
/// The base `"{title}\nMessage: {message}\n"` is hard-cut to
/// [`CAPTION_LIMIT`] characters when too long. The URL section and then the
/// metrics section are appended only if each fits in what remains.
pub fn build_caption(context: &EvalContext) -> String {
    let base = format!(
        "{}\nMessage: {}\n",
        context.notification_title(),
        context.rule.message
    );

    if char_len(&base) > CAPTION_LIMIT {
        return base.chars().take(CAPTION_LIMIT).collect();
    }

    let mut caption = base;

    if let Some(url) = context.rule_url() {
        caption = append_if_possible(caption, &format!("URL: {}\n", url), CAPTION_LIMIT);
    }

    let metrics = render_metrics(&context.eval_matches);
    if !metrics.is_empty() {
        caption = append_if_possible(caption, &format!("\nMetrics:{}", metrics), CAPTION_LIMIT);
    }

    caption
}

fn append_if_possible(message: String, extra: &str, size_limit: usize) -> String {
    if char_len(&message) + char_len(extra) <= size_limit {
        return message + extra;
    }
    tracing::debug!("Line too long for image caption: {:?}", extra);
    message
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
