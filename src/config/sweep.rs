//! Configuration for the change-detection sweep.

use std::time::Duration;

use serde::Deserialize;

use super::deserialize_duration_from_seconds;

/// Configuration for one sweep run.
#[derive(Debug, Deserialize, Clone)]
pub struct SweepConfig {
    /// Per-page fetch timeout.
    #[serde(
        default = "default_fetch_timeout",
        deserialize_with = "deserialize_duration_from_seconds"
    )]
    pub fetch_timeout: Duration,

    /// Upper bound on monitors checked in a single run. Ids beyond the cap
    /// wait for the next scheduled run.
    #[serde(default = "default_max_monitors_per_run")]
    pub max_monitors_per_run: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: default_fetch_timeout(),
            max_monitors_per_run: default_max_monitors_per_run(),
        }
    }
}

fn default_fetch_timeout() -> Duration {
    Duration::from_secs(15)
}

fn default_max_monitors_per_run() -> usize {
    25
}
