//! Error types for the telegram notifier

use std::path::PathBuf;

/// Errors that can occur while building or delivering a notification
#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Image unavailable at {}: {source}", path.display())]
    ImageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No rendered image to attach")]
    NoImage,

    #[error("Dispatch failed: {0}")]
    Dispatch(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for notifier operations
pub type Result<T> = std::result::Result<T, NotifierError>;
