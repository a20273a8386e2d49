//! Configuration types for the telegram notifier

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::NotifierError;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notifiers: Vec<NotificationModel>,
}

/// A persisted notifier definition. `settings` is interpreted by the
/// notifier type named in `notifier_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationModel {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub notifier_type: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub settings: Option<serde_json::Value>,
}

/// Validated Telegram settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(rename = "bottoken", default)]
    pub bot_token: String,
    #[serde(rename = "chatid", default)]
    pub chat_id: String,
    #[serde(rename = "uploadImage", default)]
    pub upload_image: bool,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("chat_id", &self.chat_id)
            .field("upload_image", &self.upload_image)
            .finish()
    }
}

impl TelegramConfig {
    /// Parse and validate the settings of a `telegram` notification model
    pub fn from_model(model: &NotificationModel) -> crate::Result<Self> {
        let settings = model
            .settings
            .as_ref()
            .filter(|s| !s.is_null())
            .ok_or_else(|| NotifierError::Config("No Settings Supplied".to_string()))?;

        let config: TelegramConfig = serde_json::from_value(settings.clone()).map_err(|e| {
            NotifierError::Config(format!("Invalid settings for '{}': {}", model.name, e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.bot_token.is_empty() {
            return Err(NotifierError::Config(
                "Could not find Bot Token in settings".to_string(),
            ));
        }
        if self.chat_id.is_empty() {
            return Err(NotifierError::Config(
                "Could not find Chat Id in settings".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        NotifierError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
