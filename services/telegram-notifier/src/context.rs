//! Evaluation results handed to notifiers by the alert evaluator

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// State of an alert rule after evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertState {
    NoData,
    Paused,
    Alerting,
    #[default]
    Ok,
    Pending,
}

impl AlertState {
    /// Human readable label used in notification titles
    pub fn text(&self) -> &'static str {
        match self {
            AlertState::NoData => "No Data",
            AlertState::Paused => "Paused",
            AlertState::Alerting => "Alerting",
            AlertState::Ok => "OK",
            AlertState::Pending => "Pending",
        }
    }
}

impl fmt::Display for AlertState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// The alert rule that produced an evaluation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rule {
    pub id: i64,
    pub name: String,
    pub message: String,
    pub state: AlertState,
}

/// A single metric series that matched the rule condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalMatch {
    pub metric: String,
    pub value: String,
}

impl EvalMatch {
    pub fn new(metric: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            value: value.into(),
        }
    }
}

/// Result of one rule evaluation, read-only to notifiers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvalContext {
    pub rule: Rule,
    #[serde(default)]
    pub prev_alert_state: AlertState,
    #[serde(default)]
    pub eval_matches: Vec<EvalMatch>,
    /// Rendered panel image, if the renderer produced one
    #[serde(default)]
    pub image_on_disk_path: Option<PathBuf>,
    /// Publicly reachable copy of the rendered image
    #[serde(default)]
    pub image_public_url: Option<String>,
    /// Link back to the rule in the dashboard
    #[serde(default)]
    pub rule_url: Option<String>,
}

impl EvalContext {
    /// Title shown at the top of every notification, e.g. `[Alerting] High CPU`
    pub fn notification_title(&self) -> String {
        format!("[{}] {}", self.rule.state.text(), self.rule.name)
    }

    /// The public image URL, treating an empty string as absent
    pub fn public_image_url(&self) -> Option<&str> {
        self.image_public_url
            .as_deref()
            .filter(|url| !url.is_empty())
    }

    /// The rule URL, treating an empty string as absent
    pub fn rule_url(&self) -> Option<&str> {
        self.rule_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Notify only on state changes, and never for `pending -> ok`.
pub fn default_should_notify(context: &EvalContext) -> bool {
    if context.prev_alert_state == context.rule.state {
        return false;
    }

    if context.prev_alert_state == AlertState::Pending && context.rule.state == AlertState::Ok {
        return false;
    }

    true
}
