//! Synthetic evaluation used to check a notifier end to end

use crate::context::{AlertState, EvalContext, EvalMatch, Rule};

const TEST_IMAGE_URL: &str = "https://upload.wikimedia.org/wikipedia/commons/4/47/PNG_transparency_demonstration_1.png";

/// An alerting evaluation with two matches and a public image
pub fn build_test_context() -> EvalContext {
    EvalContext {
        rule: Rule {
            id: 0,
            name: "Test notification".to_string(),
            message: "Someone is testing the alert notification.".to_string(),
            state: AlertState::Alerting,
        },
        prev_alert_state: AlertState::Ok,
        eval_matches: vec![
            EvalMatch::new("High value", "100"),
            EvalMatch::new("Higher Value", "200"),
        ],
        image_on_disk_path: None,
        image_public_url: Some(TEST_IMAGE_URL.to_string()),
        rule_url: None,
    }
}
