//! This module implements the monitor lifecycle operations and is the only
//! place the free-tier quota is enforced.

use std::{sync::Arc, time::Duration};

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use super::error::MonitorError;
use crate::{
    content::extract_page_info,
    fetcher::PageFetcher,
    models::{FreeUsage, Monitor, MonitorOverview, PageInfo},
    notification::{messages, NotificationSink},
    persistence::MonitorStore,
};

/// Timeout for the best-effort page-info fetch at creation time.
const PAGE_INFO_TIMEOUT: Duration = Duration::from_secs(10);

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// Creates and deletes monitors for an account, enforcing the free-tier
/// quota.
///
/// The quota gate is a count-then-create sequence with no cross-request
/// locking: concurrent creations for the same owner can both observe a stale
/// count and transiently exceed the limit. The limit is a soft one.
pub struct MonitorManager {
    store: MonitorStore,
    fetcher: Arc<dyn PageFetcher>,
    sink: Arc<dyn NotificationSink>,
    free_limit: u32,
}

impl MonitorManager {
    /// Creates a manager over the given store and collaborators.
    pub fn new(
        store: MonitorStore,
        fetcher: Arc<dyn PageFetcher>,
        sink: Arc<dyn NotificationSink>,
        free_limit: u32,
    ) -> Self {
        Self { store, fetcher, sink, free_limit }
    }

    /// Creates a free monitor, subject to the owner's quota.
    ///
    /// Fails with `QuotaExceeded` before any state is written; callers are
    /// expected to route the owner to the paid path.
    pub async fn create_free_monitor(
        &self,
        owner_email: &str,
        url: &str,
    ) -> Result<Monitor, MonitorError> {
        let owner_email = validate_owner_email(owner_email)?;
        validate_url(url)?;

        let used = self.store.count_active_free(&owner_email).await?;
        if used >= self.free_limit {
            return Err(MonitorError::QuotaExceeded { used, limit: self.free_limit });
        }

        self.create(&owner_email, url, false).await
    }

    /// Creates a paid monitor in response to a confirmed payment event.
    ///
    /// Never subject to the quota check. A redelivered payment event creates
    /// a second monitor for the same url and owner; callers needing
    /// exactly-once creation must deduplicate events upstream.
    pub async fn create_paid_monitor(
        &self,
        owner_email: &str,
        url: &str,
    ) -> Result<Monitor, MonitorError> {
        let owner_email = validate_owner_email(owner_email)?;
        validate_url(url)?;
        self.create(&owner_email, url, true).await
    }

    async fn create(
        &self,
        owner_email: &str,
        url: &str,
        paid: bool,
    ) -> Result<Monitor, MonitorError> {
        let monitor = Monitor::new(owner_email, url, paid);
        self.store.save(&monitor).await?;
        self.store.index(&monitor).await?;
        tracing::info!(monitor_id = %monitor.id, url = %monitor.url, paid, "Monitor created.");

        self.send_welcome_email(&monitor).await;

        Ok(monitor)
    }

    /// Best-effort welcome email; failures are logged and never fail the
    /// creation.
    async fn send_welcome_email(&self, monitor: &Monitor) {
        let page_info = match self.fetcher.fetch(&monitor.url, PAGE_INFO_TIMEOUT).await {
            Ok(page) if page.is_success() => extract_page_info(&page.body),
            Ok(page) => {
                tracing::debug!(
                    url = %monitor.url,
                    status = page.status,
                    "Page info fetch returned non-success status."
                );
                PageInfo::default()
            }
            Err(e) => {
                tracing::debug!(url = %monitor.url, error = %e, "Page info fetch failed.");
                PageInfo::default()
            }
        };

        let (subject, body) = messages::welcome(&monitor.url, &page_info);
        if let Err(e) = self.sink.send(&monitor.owner_email, &subject, &body).await {
            tracing::warn!(
                monitor_id = %monitor.id,
                error = %e,
                "Failed to send welcome email."
            );
        }
    }

    /// Deletes a monitor after verifying ownership.
    ///
    /// Index entries are removed before the record so the active set never
    /// references a deleted record.
    pub async fn delete_monitor(
        &self,
        owner_email: &str,
        monitor_id: &str,
    ) -> Result<(), MonitorError> {
        let monitor = self.store.get(monitor_id).await?.ok_or(MonitorError::NotFound)?;

        if !monitor.owner_email.eq_ignore_ascii_case(owner_email.trim()) {
            return Err(MonitorError::NotOwner);
        }

        self.store.unindex(&monitor).await?;
        self.store.delete(monitor_id).await?;
        tracing::info!(monitor_id, owner = %monitor.owner_email, "Monitor deleted.");
        Ok(())
    }

    /// Reports the owner's free-tier usage.
    pub async fn free_usage(&self, owner_email: &str) -> Result<FreeUsage, MonitorError> {
        let owner_email = validate_owner_email(owner_email)?;
        let used = self.store.count_active_free(&owner_email).await?;
        Ok(FreeUsage { used, limit: self.free_limit, can_add_free: used < self.free_limit })
    }

    /// Lists the owner's monitors, newest first.
    pub async fn list_monitors(
        &self,
        owner_email: &str,
    ) -> Result<Vec<MonitorOverview>, MonitorError> {
        let owner_email = validate_owner_email(owner_email)?;
        let mut monitors = self.store.monitors_owned_by(&owner_email).await?;
        monitors.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(monitors.iter().map(MonitorOverview::from).collect())
    }
}

/// Normalizes and validates an owner email.
fn validate_owner_email(owner_email: &str) -> Result<String, MonitorError> {
    let normalized = owner_email.trim().to_lowercase();
    if !EMAIL_SHAPE.is_match(&normalized) {
        return Err(MonitorError::InvalidEmail);
    }
    Ok(normalized)
}

/// Validates that a target URL parses and uses an http(s) scheme.
fn validate_url(url: &str) -> Result<(), MonitorError> {
    let parsed = Url::parse(url).map_err(|_| MonitorError::InvalidUrl)?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(MonitorError::InvalidUrl),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_owner_email_normalizes() {
        assert_eq!(validate_owner_email("  Owner@Example.COM ").unwrap(), "owner@example.com");
    }

    #[test]
    fn test_validate_owner_email_rejects_malformed() {
        for email in ["", "no-at-sign", "a@b", "spaces in@example.com", "@example.com"] {
            assert!(
                matches!(validate_owner_email(email), Err(MonitorError::InvalidEmail)),
                "expected {email:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_validate_url_accepts_http_and_https() {
        assert!(validate_url("http://example.com/jobs").is_ok());
        assert!(validate_url("https://example.com/jobs?id=1").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_other_schemes_and_garbage() {
        for url in ["ftp://example.com", "file:///etc/passwd", "not a url", "example.com"] {
            assert!(
                matches!(validate_url(url), Err(MonitorError::InvalidUrl)),
                "expected {url:?} to be rejected"
            );
        }
    }
}
