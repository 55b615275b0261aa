//! Error types for monitor lifecycle operations.

use thiserror::Error;

use crate::persistence::error::PersistenceError;

/// Errors returned by the monitor lifecycle manager.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The target URL did not parse or uses a scheme other than http/https.
    #[error("invalid URL: must be an absolute http or https address")]
    InvalidUrl,

    /// The owner email is missing or malformed.
    #[error("invalid email address")]
    InvalidEmail,

    /// The owner has reached the free-tier monitor limit.
    #[error("free monitor limit reached ({used}/{limit})")]
    QuotaExceeded {
        /// Active, unpaid monitors the owner currently holds.
        used: u32,
        /// The free-tier limit.
        limit: u32,
    },

    /// No monitor exists with the given id.
    #[error("monitor not found")]
    NotFound,

    /// The monitor belongs to a different account.
    #[error("monitor belongs to another account")]
    NotOwner,

    /// An error occurred in the persistence layer.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
