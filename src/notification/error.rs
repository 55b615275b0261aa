//! Error types for the notification service.

use thiserror::Error;

/// Defines the possible errors that can occur within the notification
/// service.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// An error related to invalid or missing configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An error from the underlying `reqwest` library.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// An error indicating that the notification failed to be sent.
    #[error("Notification failed: {0}")]
    SendFailed(String),
}
