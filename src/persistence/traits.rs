//! Abstract storage contract consumed by the rest of the application.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::persistence::error::PersistenceError;

/// A key-value store with set semantics.
///
/// All shared state lives behind this contract; implementations must be safe
/// for concurrent use from independent tasks. Values are opaque strings; the
/// [`MonitorStore`](crate::persistence::MonitorStore) boundary owns all
/// serialization.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Retrieves the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Removes the value stored under `key`. Removing an absent key is not an
    /// error.
    async fn delete(&self, key: &str) -> Result<(), PersistenceError>;

    /// Adds `member` to the set stored under `key`. Adding an existing member
    /// is a no-op.
    async fn set_add(&self, key: &str, member: &str) -> Result<(), PersistenceError>;

    /// Removes `member` from the set stored under `key`. Removing an absent
    /// member is not an error.
    async fn set_remove(&self, key: &str, member: &str) -> Result<(), PersistenceError>;

    /// Returns all members of the set stored under `key`.
    async fn set_members(&self, key: &str) -> Result<Vec<String>, PersistenceError>;
}
