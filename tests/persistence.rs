//! Integration tests for the SQLite-backed key-value store.

use std::sync::Arc;

use pagewatch::{
    persistence::{traits::KeyValueStore, MonitorStore, SqliteStore},
    test_helpers::MonitorBuilder,
};
use tempfile::TempDir;

async fn setup_store() -> (SqliteStore, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let database_url = format!("sqlite://{}", dir.path().join("test.db").display());
    let store = SqliteStore::new(&database_url).await.expect("Failed to connect to database");
    store.run_migrations().await.expect("Failed to run migrations");
    (store, dir)
}

#[tokio::test]
async fn test_get_missing_key_returns_none() {
    let (store, _dir) = setup_store().await;
    assert_eq!(store.get("missing").await.unwrap(), None);
}

#[tokio::test]
async fn test_set_get_and_overwrite() {
    let (store, _dir) = setup_store().await;

    store.set("k", "v1").await.unwrap();
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v1"));

    store.set("k", "v2").await.unwrap();
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let (store, _dir) = setup_store().await;

    store.set("k", "v").await.unwrap();
    store.delete("k").await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), None);

    // Deleting an absent key is not an error.
    store.delete("k").await.unwrap();
}

#[tokio::test]
async fn test_set_members_keep_insertion_order() {
    let (store, _dir) = setup_store().await;

    store.set_add("s", "a").await.unwrap();
    store.set_add("s", "b").await.unwrap();
    store.set_add("s", "c").await.unwrap();

    assert_eq!(store.set_members("s").await.unwrap(), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_set_add_is_idempotent_per_member() {
    let (store, _dir) = setup_store().await;

    store.set_add("s", "a").await.unwrap();
    store.set_add("s", "a").await.unwrap();

    assert_eq!(store.set_members("s").await.unwrap(), vec!["a"]);
}

#[tokio::test]
async fn test_set_remove() {
    let (store, _dir) = setup_store().await;

    store.set_add("s", "a").await.unwrap();
    store.set_add("s", "b").await.unwrap();
    store.set_remove("s", "a").await.unwrap();

    assert_eq!(store.set_members("s").await.unwrap(), vec!["b"]);

    // Removing an absent member is not an error.
    store.set_remove("s", "a").await.unwrap();
}

#[tokio::test]
async fn test_members_of_missing_set_is_empty() {
    let (store, _dir) = setup_store().await;
    assert!(store.set_members("missing").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sets_are_isolated_by_key() {
    let (store, _dir) = setup_store().await;

    store.set_add("s1", "a").await.unwrap();
    store.set_add("s2", "b").await.unwrap();

    assert_eq!(store.set_members("s1").await.unwrap(), vec!["a"]);
    assert_eq!(store.set_members("s2").await.unwrap(), vec!["b"]);
}

#[tokio::test]
async fn test_monitor_store_round_trip_over_sqlite() {
    let (store, _dir) = setup_store().await;
    let monitors = MonitorStore::new(Arc::new(store));

    let monitor = MonitorBuilder::new()
        .owner_email("owner@example.com")
        .url("https://example.com/jobs")
        .last_fingerprint("deadbeef")
        .build();

    monitors.save(&monitor).await.unwrap();
    monitors.index(&monitor).await.unwrap();

    assert_eq!(monitors.get(&monitor.id).await.unwrap(), Some(monitor.clone()));
    assert_eq!(monitors.active_ids().await.unwrap(), vec![monitor.id.clone()]);
    assert_eq!(monitors.count_active_free("owner@example.com").await.unwrap(), 1);

    monitors.unindex(&monitor).await.unwrap();
    monitors.delete(&monitor.id).await.unwrap();

    assert_eq!(monitors.get(&monitor.id).await.unwrap(), None);
    assert!(monitors.active_ids().await.unwrap().is_empty());
}
