//! This module provides a concrete implementation of the key-value contract
//! using SQLite.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{sqlite::SqliteConnectOptions, Row, SqlitePool};

use crate::persistence::{error::PersistenceError, traits::KeyValueStore};

/// A [`KeyValueStore`] backed by a SQLite database.
///
/// Plain entries live in `kv_entries`; set membership lives in
/// `kv_set_members`, one row per member. `set_members` returns members in
/// insertion order, which is what gives the sweep its stable batch prefix.
pub struct SqliteStore {
    /// The SQLite connection pool used for database operations.
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connects to the database at `database_url`, creating the file if it
    /// does not exist.
    #[tracing::instrument(level = "info")]
    pub async fn new(database_url: &str) -> Result<Self, PersistenceError> {
        tracing::debug!(database_url, "Attempting to connect to SQLite database.");
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| PersistenceError::InvalidInput(e.to_string()))?
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await.map_err(|e| {
            PersistenceError::OperationFailed(format!("Failed to connect to database: {}", e))
        })?;
        tracing::info!(database_url, "Successfully connected to SQLite database.");
        Ok(Self { pool })
    }

    /// Runs database migrations.
    #[tracing::instrument(skip(self), level = "info")]
    pub async fn run_migrations(&self) -> Result<(), PersistenceError> {
        sqlx::migrate!("./migrations").run(&self.pool).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to run database migrations.");
            PersistenceError::MigrationError(e.to_string())
        })?;
        tracing::info!("Database migrations completed successfully.");
        Ok(())
    }

    /// Closes the connection pool gracefully.
    #[tracing::instrument(skip(self), level = "info")]
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn operation_failed(operation: &str, e: sqlx::Error) -> PersistenceError {
    tracing::error!(error = %e, operation, "Database operation failed.");
    PersistenceError::OperationFailed(e.to_string())
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let row = sqlx::query("SELECT value FROM kv_entries WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| operation_failed("get", e))?;

        match row {
            Some(row) => {
                let value = row
                    .try_get::<String, _>("value")
                    .map_err(|e| PersistenceError::OperationFailed(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self, value), level = "debug")]
    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        sqlx::query(
            "INSERT INTO kv_entries (key, value) VALUES (?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| operation_failed("set", e))?;
        Ok(())
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn delete(&self, key: &str) -> Result<(), PersistenceError> {
        sqlx::query("DELETE FROM kv_entries WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| operation_failed("delete", e))?;
        Ok(())
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn set_add(&self, key: &str, member: &str) -> Result<(), PersistenceError> {
        sqlx::query("INSERT OR IGNORE INTO kv_set_members (key, member) VALUES (?, ?)")
            .bind(key)
            .bind(member)
            .execute(&self.pool)
            .await
            .map_err(|e| operation_failed("set_add", e))?;
        Ok(())
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn set_remove(&self, key: &str, member: &str) -> Result<(), PersistenceError> {
        sqlx::query("DELETE FROM kv_set_members WHERE key = ? AND member = ?")
            .bind(key)
            .bind(member)
            .execute(&self.pool)
            .await
            .map_err(|e| operation_failed("set_remove", e))?;
        Ok(())
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn set_members(&self, key: &str) -> Result<Vec<String>, PersistenceError> {
        let rows = sqlx::query("SELECT member FROM kv_set_members WHERE key = ? ORDER BY rowid")
            .bind(key)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| operation_failed("set_members", e))?;

        rows.into_iter()
            .map(|row| {
                row.try_get::<String, _>("member")
                    .map_err(|e| PersistenceError::OperationFailed(e.to_string()))
            })
            .collect()
    }
}
