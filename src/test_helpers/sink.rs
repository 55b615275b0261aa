//! A notification sink that records sent messages, for tests.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use async_trait::async_trait;

use crate::notification::{NotificationError, NotificationSink};

/// A message captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    /// Recipient address.
    pub to: String,
    /// Message subject.
    pub subject: String,
    /// Message body.
    pub body: String,
}

/// A `NotificationSink` that records every send.
///
/// Can be switched into a failing mode to exercise delivery-failure paths.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<SentEmail>>,
    failing: AtomicBool,
}

impl RecordingSink {
    /// Creates a sink that accepts every send.
    pub fn new() -> Self {
        Self::default()
    }

    /// When `failing` is true, every send returns an error (and is not
    /// recorded).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Returns a copy of everything sent so far.
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn send(
        &self,
        to_address: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), NotificationError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("sink set to fail".to_string()));
        }
        self.sent.lock().unwrap().push(SentEmail {
            to: to_address.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}
