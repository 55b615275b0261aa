//! This module defines the `Monitor` structure, the unit of page tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered page under change monitoring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Monitor {
    /// Opaque unique identifier, generated at creation. Immutable.
    pub id: String,

    /// The page being tracked. Immutable after creation; changing the target
    /// requires delete-and-recreate.
    pub url: String,

    /// Lower-cased email of the owning account.
    pub owner_email: String,

    /// Hex digest of the page content as of the last successful check.
    /// Empty until the first sweep establishes a baseline.
    #[serde(default)]
    pub last_fingerprint: String,

    /// When the last change notification was sent, if ever.
    #[serde(default)]
    pub last_notified_at: Option<DateTime<Utc>>,

    /// Timestamp when the monitor was created.
    pub created_at: DateTime<Utc>,

    /// Inactive monitors are excluded from the sweep and from quota counting,
    /// but the record is retained.
    pub active: bool,

    /// Paid monitors are exempt from the free-tier quota.
    pub paid: bool,
}

impl Monitor {
    /// Creates a new active monitor with a fresh id and no baseline
    /// fingerprint.
    pub fn new(owner_email: &str, url: &str, paid: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            owner_email: owner_email.to_lowercase(),
            last_fingerprint: String::new(),
            last_notified_at: None,
            created_at: Utc::now(),
            active: true,
            paid,
        }
    }

    /// True once a sweep has stored a baseline fingerprint.
    pub fn has_fingerprint(&self) -> bool {
        !self.last_fingerprint.is_empty()
    }

    /// True if this monitor counts against its owner's free quota.
    pub fn counts_against_free_quota(&self) -> bool {
        self.active && !self.paid
    }
}

/// The dashboard projection of a monitor.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonitorOverview {
    /// Monitor identifier.
    pub id: String,
    /// The page being tracked.
    pub url: String,
    /// Whether the monitor participates in the sweep.
    pub active: bool,
    /// Whether the monitor is quota-exempt.
    pub paid: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// When the last change notification was sent, if ever.
    pub last_notified_at: Option<DateTime<Utc>>,
    /// True once a sweep has established a baseline fingerprint.
    pub has_fingerprint: bool,
}

impl From<&Monitor> for MonitorOverview {
    fn from(monitor: &Monitor) -> Self {
        Self {
            id: monitor.id.clone(),
            url: monitor.url.clone(),
            active: monitor.active,
            paid: monitor.paid,
            created_at: monitor.created_at,
            last_notified_at: monitor.last_notified_at,
            has_fingerprint: monitor.has_fingerprint(),
        }
    }
}
