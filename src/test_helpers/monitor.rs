//! A builder for creating `Monitor` instances in tests.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::Monitor;

/// A builder for creating `Monitor` instances in tests.
pub struct MonitorBuilder {
    id: Option<String>,
    url: Option<String>,
    owner_email: Option<String>,
    last_fingerprint: Option<String>,
    last_notified_at: Option<DateTime<Utc>>,
    created_at: Option<DateTime<Utc>>,
    active: bool,
    paid: bool,
}

impl Default for MonitorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitorBuilder {
    /// Creates a new `MonitorBuilder` instance.
    pub fn new() -> Self {
        MonitorBuilder {
            id: None,
            url: None,
            owner_email: None,
            last_fingerprint: None,
            last_notified_at: None,
            created_at: None,
            active: true,
            paid: false,
        }
    }

    /// Sets the id for the monitor.
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Sets the target URL for the monitor.
    pub fn url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    /// Sets the owner email for the monitor.
    pub fn owner_email(mut self, owner_email: &str) -> Self {
        self.owner_email = Some(owner_email.to_string());
        self
    }

    /// Sets the stored fingerprint for the monitor.
    pub fn last_fingerprint(mut self, fingerprint: &str) -> Self {
        self.last_fingerprint = Some(fingerprint.to_string());
        self
    }

    /// Sets the last notification timestamp for the monitor.
    pub fn last_notified_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_notified_at = Some(at);
        self
    }

    /// Sets the creation timestamp for the monitor.
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Sets whether the monitor is active.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Sets whether the monitor is paid.
    pub fn paid(mut self, paid: bool) -> Self {
        self.paid = paid;
        self
    }

    /// Builds the `Monitor` instance.
    pub fn build(self) -> Monitor {
        Monitor {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            url: self.url.unwrap_or("https://example.com/jobs".to_string()),
            owner_email: self.owner_email.unwrap_or("owner@example.com".to_string()),
            last_fingerprint: self.last_fingerprint.unwrap_or_default(),
            last_notified_at: self.last_notified_at,
            created_at: self.created_at.unwrap_or_else(Utc::now),
            active: self.active,
            paid: self.paid,
        }
    }
}
