//! Summary counters for a sweep run.

use serde::Serialize;

/// Counters accumulated over one sweep run.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct SweepSummary {
    /// Monitors that were actually checked.
    pub checked: u32,
    /// Monitors whose content was found changed.
    pub changed: u32,
    /// Fetch and notification failures encountered.
    pub errors: u32,
}
