//! An in-memory key-value store for tests.

use std::{
    collections::HashMap,
    sync::Mutex,
};

use async_trait::async_trait;

use crate::persistence::{error::PersistenceError, traits::KeyValueStore};

/// A `KeyValueStore` over in-process maps.
///
/// Set members keep insertion order, matching the SQLite implementation.
#[derive(Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
    sets: Mutex<HashMap<String, Vec<String>>>,
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), PersistenceError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn set_add(&self, key: &str, member: &str) -> Result<(), PersistenceError> {
        let mut sets = self.sets.lock().unwrap();
        let members = sets.entry(key.to_string()).or_default();
        if !members.iter().any(|m| m == member) {
            members.push(member.to_string());
        }
        Ok(())
    }

    async fn set_remove(&self, key: &str, member: &str) -> Result<(), PersistenceError> {
        if let Some(members) = self.sets.lock().unwrap().get_mut(key) {
            members.retain(|m| m != member);
        }
        Ok(())
    }

    async fn set_members(&self, key: &str) -> Result<Vec<String>, PersistenceError> {
        Ok(self.sets.lock().unwrap().get(key).cloned().unwrap_or_default())
    }
}
