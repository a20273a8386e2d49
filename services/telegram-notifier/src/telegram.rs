//! Telegram notifier
//!
//! Chooses between a captioned photo (`sendPhoto`) and a text message with
//! links (`sendMessage`) for each notification. Photo delivery is best
//! effort: any failure to attach the image falls back to the text message.

use std::sync::Arc;

use async_trait::async_trait;

use crate::caption::build_caption;
use crate::config::{NotificationModel, TelegramConfig};
use crate::context::EvalContext;
use crate::error::NotifierError;
use crate::io::WebhookSender;
use crate::message::build_message;
use crate::notifier::{Notifier, NotifierPlugin};
use crate::payload::{encode, encode_text, MessageContent, OutboundRequest};

/// Result of trying to build a `sendPhoto` request
#[derive(Debug)]
pub enum InlineOutcome {
    Ready(OutboundRequest),
    Fallback(NotifierError),
}

/// Telegram notification sender
pub struct TelegramNotifier {
    name: String,
    config: TelegramConfig,
    sender: Arc<dyn WebhookSender>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("name", &self.name)
            .field("config", &self.config)
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(
        name: impl Into<String>,
        config: TelegramConfig,
        sender: Arc<dyn WebhookSender>,
    ) -> crate::Result<Self> {
        config.validate()?;
        let name = name.into();
        tracing::debug!(
            "Created TelegramNotifier '{}' for chat {} (upload_image={})",
            name,
            config.chat_id,
            config.upload_image
        );
        Ok(Self {
            name,
            config,
            sender,
        })
    }

    pub fn from_model(
        model: &NotificationModel,
        sender: Arc<dyn WebhookSender>,
    ) -> crate::Result<Self> {
        Self::new(&model.name, TelegramConfig::from_model(model)?, sender)
    }

    /// Registry entry for this notifier type
    pub fn plugin() -> NotifierPlugin {
        NotifierPlugin {
            type_name: "telegram",
            name: "Telegram",
            description: "Sends notifications to Telegram",
            factory: create_notifier,
        }
    }

    pub fn config(&self) -> &TelegramConfig {
        &self.config
    }

    /// Build the request for `context`.
    ///
    /// Photo delivery is attempted only when the image has no public URL
    /// and uploads are enabled. This never fails: if the photo request
    /// cannot be built, a text message is built instead.
    pub async fn select_and_build(&self, context: &EvalContext) -> OutboundRequest {
        if context.public_image_url().is_none() && self.config.upload_image {
            match self.build_inline(context).await {
                InlineOutcome::Ready(request) => return request,
                InlineOutcome::Fallback(e) => {
                    tracing::error!("Could not send inline image with Telegram: {}", e);
                }
            }
        }

        self.build_linked(context)
    }

    /// Try to build a `sendPhoto` request carrying the rendered image
    pub async fn build_inline(&self, context: &EvalContext) -> InlineOutcome {
        let Some(image_path) = context.image_on_disk_path.as_deref() else {
            return InlineOutcome::Fallback(NotifierError::NoImage);
        };

        let content = MessageContent::Photo {
            caption: build_caption(context),
            image_path: image_path.to_path_buf(),
        };
        match encode(&self.config.bot_token, &self.config.chat_id, content).await {
            Ok(request) => {
                tracing::info!(
                    "Sending telegram image notification to chat {}",
                    self.config.chat_id
                );
                InlineOutcome::Ready(request)
            }
            Err(e) => InlineOutcome::Fallback(e),
        }
    }

    /// Build a `sendMessage` request with the image linked rather than attached
    pub fn build_linked(&self, context: &EvalContext) -> OutboundRequest {
        tracing::info!(
            "Sending telegram text notification to chat {}",
            self.config.chat_id
        );
        encode_text(
            &self.config.bot_token,
            &self.config.chat_id,
            &build_message(context),
        )
    }
}

fn create_notifier(
    model: &NotificationModel,
    sender: Arc<dyn WebhookSender>,
) -> crate::Result<Arc<dyn Notifier>> {
    Ok(Arc::new(TelegramNotifier::from_model(model, sender)?))
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn notify(&self, context: &EvalContext) -> crate::Result<()> {
        let request = self.select_and_build(context).await;

        if let Err(e) = self.sender.send(&request).await {
            tracing::error!("Failed to send webhook '{}': {}", self.name, e);
            return Err(e);
        }

        tracing::debug!("Telegram notification '{}' sent successfully", self.name);
        Ok(())
    }
}
