//! Telegram notifier - alert delivery to Telegram chats
//!
//! Turns an alert evaluation into a single Bot API request: a captioned
//! photo when the rendered panel can be uploaded, otherwise an HTML text
//! message linking to it.

pub mod caption;
pub mod config;
pub mod context;
pub mod error;
pub mod io;
pub mod message;
pub mod notifier;
pub mod payload;
pub mod telegram;
pub mod test_notification;

pub use config::{load_config, Config, NotificationModel, TelegramConfig};
pub use context::{AlertState, EvalContext, EvalMatch, Rule};
pub use error::{NotifierError, Result};
pub use notifier::{Notifier, NotifierPlugin, NotifierRegistry};
pub use payload::OutboundRequest;
pub use telegram::{InlineOutcome, TelegramNotifier};

use std::sync::Arc;

use crate::io::{ReqwestWebhookSender, WebhookSender};

/// Sends the test notification through configured notifiers.
///
/// Notifiers are created from `config` through a registry, so every
/// notifier definition is validated before anything is sent.
pub struct TestSendBuilder {
    config: Config,
    registry: NotifierRegistry,
    sender: Arc<dyn WebhookSender>,
    only: Option<String>,
}

impl TestSendBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            registry: NotifierRegistry::with_defaults(),
            sender: Arc::new(ReqwestWebhookSender::default()),
            only: None,
        }
    }

    pub fn with_registry(mut self, registry: NotifierRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_sender(mut self, sender: Arc<dyn WebhookSender>) -> Self {
        self.sender = sender;
        self
    }

    /// Restrict sending to the notifier with this configured name
    pub fn only(mut self, name: Option<String>) -> Self {
        self.only = name;
        self
    }

    /// Create the selected notifiers
    pub fn build(self) -> Result<Vec<Arc<dyn Notifier>>> {
        let models: Vec<&NotificationModel> = self
            .config
            .notifiers
            .iter()
            .filter(|m| self.only.as_ref().is_none_or(|name| &m.name == name))
            .collect();

        if models.is_empty() {
            return Err(NotifierError::Config(match &self.only {
                Some(name) => format!("No notifier named '{}' in configuration", name),
                None => "No notifiers configured".to_string(),
            }));
        }

        models
            .into_iter()
            .map(|model| self.registry.create(model, Arc::clone(&self.sender)))
            .collect()
    }
}

/// Send the test notification through each notifier, stopping at the first failure
pub async fn send_test_notifications(notifiers: &[Arc<dyn Notifier>]) -> Result<()> {
    let context = test_notification::build_test_context();
    for notifier in notifiers {
        tracing::info!(
            "Sending test notification via {} '{}'",
            notifier.type_name(),
            notifier.name()
        );
        notifier.notify(&context).await?;
    }
    Ok(())
}
