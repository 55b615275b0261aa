//! The change-detection sweep over all active monitors.
//!
//! Invoked on a fixed external schedule. Each run walks a bounded prefix of
//! the active-monitor index, fetches and fingerprints each page, and
//! notifies owners of changes. Failures are always monitor-local: the batch
//! runs to completion and reports aggregate counters.

use std::sync::Arc;

use chrono::Utc;

use crate::{
    config::SweepConfig,
    content,
    fetcher::PageFetcher,
    models::SweepSummary,
    notification::{messages, NotificationSink},
    persistence::{error::PersistenceError, MonitorStore},
};

/// Walks the active-monitor index and checks each page for changes.
pub struct SweepRunner {
    store: MonitorStore,
    fetcher: Arc<dyn PageFetcher>,
    sink: Arc<dyn NotificationSink>,
    config: SweepConfig,
}

impl SweepRunner {
    /// Creates a sweep runner over the given store and collaborators.
    pub fn new(
        store: MonitorStore,
        fetcher: Arc<dyn PageFetcher>,
        sink: Arc<dyn NotificationSink>,
        config: SweepConfig,
    ) -> Self {
        Self { store, fetcher, sink, config }
    }

    /// Runs one capped sweep over the active-monitor index.
    ///
    /// Only reading the index itself can fail the run; everything after that
    /// is counted per monitor.
    #[tracing::instrument(skip(self), level = "info")]
    pub async fn run(&self) -> Result<SweepSummary, PersistenceError> {
        let mut summary = SweepSummary::default();

        let active_ids = self.store.active_ids().await?;
        if active_ids.is_empty() {
            tracing::info!("No active monitors.");
            return Ok(summary);
        }

        // Bounded batch: ids beyond the cap wait for the next scheduled run.
        let batch = &active_ids[..active_ids.len().min(self.config.max_monitors_per_run)];
        tracing::info!(total = active_ids.len(), batch = batch.len(), "Starting sweep batch.");

        for id in batch {
            if let Err(e) = self.check_monitor(id, &mut summary).await {
                tracing::error!(monitor_id = %id, error = %e, "Error processing monitor.");
                summary.errors += 1;
            }
        }

        tracing::info!(
            checked = summary.checked,
            changed = summary.changed,
            errors = summary.errors,
            "Sweep complete."
        );
        Ok(summary)
    }

    /// Checks a single monitor. Fetch and notification failures are counted
    /// here; persistence failures bubble up to be counted by the caller.
    async fn check_monitor(
        &self,
        id: &str,
        summary: &mut SweepSummary,
    ) -> Result<(), PersistenceError> {
        let Some(mut monitor) = self.store.get(id).await? else {
            tracing::warn!(monitor_id = %id, "Monitor in active index but record missing.");
            return Ok(());
        };

        if !monitor.active {
            return Ok(());
        }

        summary.checked += 1;

        let page = match self.fetcher.fetch(&monitor.url, self.config.fetch_timeout).await {
            Ok(page) if page.is_success() => page,
            Ok(page) => {
                tracing::error!(url = %monitor.url, status = page.status, "Fetch returned non-success status.");
                summary.errors += 1;
                return Ok(());
            }
            Err(e) => {
                tracing::error!(url = %monitor.url, error = %e, "Fetch failed.");
                summary.errors += 1;
                return Ok(());
            }
        };

        let canonical_text = content::normalize(&page.body);
        let new_fingerprint = content::fingerprint(&canonical_text);

        if !monitor.has_fingerprint() {
            // First-ever check: establish the baseline without notifying.
            monitor.last_fingerprint = new_fingerprint;
            self.store.save(&monitor).await?;
            tracing::info!(monitor_id = %id, "Baseline fingerprint established.");
            return Ok(());
        }

        if new_fingerprint == monitor.last_fingerprint {
            return Ok(());
        }

        summary.changed += 1;

        let detected_at = Utc::now();
        monitor.last_fingerprint = new_fingerprint;
        monitor.last_notified_at = Some(detected_at);
        self.store.save(&monitor).await?;

        // The fingerprint update stays committed even if the email fails: a
        // missed alert beats re-notifying on every subsequent sweep.
        let (subject, body) = messages::change_alert(&monitor.url, detected_at, &canonical_text);
        match self.sink.send(&monitor.owner_email, &subject, &body).await {
            Ok(()) => {
                tracing::info!(monitor_id = %id, to = %monitor.owner_email, "Change notification sent.");
            }
            Err(e) => {
                tracing::error!(monitor_id = %id, error = %e, "Failed to send change notification.");
                summary.errors += 1;
            }
        }

        Ok(())
    }
}
