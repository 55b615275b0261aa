//! # Notification Service
//!
//! This module is responsible for delivering outbound email to monitor
//! owners: change alerts from the sweep and welcome messages from the
//! lifecycle manager.
//!
//! The [`NotificationSink`] trait is the seam the rest of the application
//! depends on; [`EmailNotifier`] is the production implementation, posting to
//! an HTTP email API. Delivery is fire-and-record-failure: the core never
//! retries a send synchronously.

pub mod error;
mod email;
pub mod messages;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

pub use email::EmailNotifier;
pub use error::NotificationError;

/// Delivers a notification to a single recipient.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Sends `body` to `to_address` under `subject`.
    async fn send(
        &self,
        to_address: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), NotificationError>;
}
