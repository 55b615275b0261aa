//! Free-tier usage reporting.

use serde::Serialize;

/// Free-tier usage for an account.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct FreeUsage {
    /// Number of active, unpaid monitors the account currently holds.
    pub used: u32,
    /// The free-tier limit.
    pub limit: u32,
    /// Whether another free monitor can be created.
    pub can_add_free: bool,
}
