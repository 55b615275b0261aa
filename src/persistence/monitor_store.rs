//! The monitor-level store interface over the raw key-value contract.
//!
//! Stored values are always deserialized here into the canonical
//! [`Monitor`]; no other module inspects raw storage representation.

use std::sync::Arc;

use crate::{
    models::Monitor,
    persistence::{error::PersistenceError, traits::KeyValueStore},
};

/// Key of the global set of active monitor ids.
const ACTIVE_SET_KEY: &str = "monitors:active";

fn monitor_key(id: &str) -> String {
    format!("monitor:{id}")
}

fn owner_key(email: &str) -> String {
    format!("monitors-by-owner:{}", email.to_lowercase())
}

/// Monitor persistence over an external key-value store.
///
/// Indices (the active set and the per-owner sets) live in the store and are
/// never cached across invocations.
#[derive(Clone)]
pub struct MonitorStore {
    kv: Arc<dyn KeyValueStore>,
}

impl MonitorStore {
    /// Creates a store over the given key-value backend.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Persists a monitor record.
    #[tracing::instrument(skip(self, monitor), fields(monitor_id = %monitor.id), level = "debug")]
    pub async fn save(&self, monitor: &Monitor) -> Result<(), PersistenceError> {
        let value = serde_json::to_string(monitor)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        self.kv.set(&monitor_key(&monitor.id), &value).await
    }

    /// Loads a monitor record by id.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn get(&self, id: &str) -> Result<Option<Monitor>, PersistenceError> {
        match self.kv.get(&monitor_key(id)).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| PersistenceError::SerializationError(e.to_string())),
            None => Ok(None),
        }
    }

    /// Deletes a monitor record. Callers must remove the id from the indices
    /// first so the active set never references a deleted record.
    pub async fn delete(&self, id: &str) -> Result<(), PersistenceError> {
        self.kv.delete(&monitor_key(id)).await
    }

    /// Adds a monitor id to the global active set and its owner's set.
    pub async fn index(&self, monitor: &Monitor) -> Result<(), PersistenceError> {
        self.kv.set_add(ACTIVE_SET_KEY, &monitor.id).await?;
        self.kv.set_add(&owner_key(&monitor.owner_email), &monitor.id).await
    }

    /// Removes a monitor id from the global active set and its owner's set.
    pub async fn unindex(&self, monitor: &Monitor) -> Result<(), PersistenceError> {
        self.kv.set_remove(ACTIVE_SET_KEY, &monitor.id).await?;
        self.kv.set_remove(&owner_key(&monitor.owner_email), &monitor.id).await
    }

    /// Returns all ids in the active-monitor index.
    pub async fn active_ids(&self) -> Result<Vec<String>, PersistenceError> {
        self.kv.set_members(ACTIVE_SET_KEY).await
    }

    /// Returns all monitor ids owned by the given account.
    pub async fn ids_owned_by(&self, owner_email: &str) -> Result<Vec<String>, PersistenceError> {
        self.kv.set_members(&owner_key(owner_email)).await
    }

    /// Loads every monitor owned by the given account, skipping ids whose
    /// record is missing.
    pub async fn monitors_owned_by(
        &self,
        owner_email: &str,
    ) -> Result<Vec<Monitor>, PersistenceError> {
        let ids = self.ids_owned_by(owner_email).await?;
        let mut monitors = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(monitor) = self.get(&id).await? {
                monitors.push(monitor);
            }
        }
        Ok(monitors)
    }

    /// Counts the owner's active, unpaid monitors.
    pub async fn count_active_free(&self, owner_email: &str) -> Result<u32, PersistenceError> {
        let monitors = self.monitors_owned_by(owner_email).await?;
        Ok(monitors.iter().filter(|m| m.counts_against_free_quota()).count() as u32)
    }
}
