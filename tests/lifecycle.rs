//! Integration tests for the monitor lifecycle manager.

use std::sync::Arc;

use chrono::{Duration, Utc};
use pagewatch::{
    monitor::{MonitorError, MonitorManager},
    persistence::MonitorStore,
    test_helpers::{InMemoryStore, MonitorBuilder, RecordingSink, StaticPageFetcher},
};

const FREE_LIMIT: u32 = 2;

struct TestContext {
    store: MonitorStore,
    fetcher: Arc<StaticPageFetcher>,
    sink: Arc<RecordingSink>,
    manager: MonitorManager,
}

fn setup() -> TestContext {
    let store = MonitorStore::new(Arc::new(InMemoryStore::default()));
    let fetcher = Arc::new(StaticPageFetcher::new());
    let sink = Arc::new(RecordingSink::new());
    let manager = MonitorManager::new(store.clone(), fetcher.clone(), sink.clone(), FREE_LIMIT);
    TestContext { store, fetcher, sink, manager }
}

#[tokio::test]
async fn test_create_free_monitor_persists_record_and_indices() {
    let ctx = setup();

    let monitor =
        ctx.manager.create_free_monitor("owner@example.com", "https://example.com/jobs").await.unwrap();

    assert_eq!(monitor.owner_email, "owner@example.com");
    assert_eq!(monitor.url, "https://example.com/jobs");
    assert!(monitor.active);
    assert!(!monitor.paid);
    assert_eq!(monitor.last_fingerprint, "");
    assert_eq!(monitor.last_notified_at, None);

    let stored = ctx.store.get(&monitor.id).await.unwrap();
    assert_eq!(stored, Some(monitor.clone()));
    assert_eq!(ctx.store.active_ids().await.unwrap(), vec![monitor.id.clone()]);
    assert_eq!(ctx.store.ids_owned_by("owner@example.com").await.unwrap(), vec![monitor.id]);
}

#[tokio::test]
async fn test_owner_email_is_normalized() {
    let ctx = setup();

    let monitor =
        ctx.manager.create_free_monitor("  Owner@Example.COM ", "https://example.com").await.unwrap();

    assert_eq!(monitor.owner_email, "owner@example.com");
    assert_eq!(ctx.store.ids_owned_by("owner@example.com").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_quota_rejects_third_free_monitor() {
    let ctx = setup();

    ctx.manager.create_free_monitor("owner@example.com", "https://example.com/a").await.unwrap();
    ctx.manager.create_free_monitor("owner@example.com", "https://example.com/b").await.unwrap();

    let result = ctx.manager.create_free_monitor("owner@example.com", "https://example.com/c").await;

    match result {
        Err(MonitorError::QuotaExceeded { used, limit }) => {
            assert_eq!(used, 2);
            assert_eq!(limit, FREE_LIMIT);
        }
        other => panic!("expected QuotaExceeded, got {other:?}"),
    }

    // The rejected creation must not have touched any state.
    assert_eq!(ctx.store.active_ids().await.unwrap().len(), 2);
    assert_eq!(ctx.store.ids_owned_by("owner@example.com").await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_second_free_monitor_is_allowed() {
    let ctx = setup();

    ctx.manager.create_free_monitor("owner@example.com", "https://example.com/a").await.unwrap();
    ctx.manager.create_free_monitor("owner@example.com", "https://example.com/b").await.unwrap();

    let usage = ctx.manager.free_usage("owner@example.com").await.unwrap();
    assert_eq!(usage.used, 2);
    assert_eq!(usage.limit, FREE_LIMIT);
    assert!(!usage.can_add_free);
}

#[tokio::test]
async fn test_quota_is_per_owner() {
    let ctx = setup();

    ctx.manager.create_free_monitor("a@example.com", "https://example.com/1").await.unwrap();
    ctx.manager.create_free_monitor("a@example.com", "https://example.com/2").await.unwrap();

    // A different owner still has a free quota.
    assert!(ctx.manager.create_free_monitor("b@example.com", "https://example.com/3").await.is_ok());
}

#[tokio::test]
async fn test_paid_monitor_bypasses_quota() {
    let ctx = setup();

    ctx.manager.create_free_monitor("owner@example.com", "https://example.com/a").await.unwrap();
    ctx.manager.create_free_monitor("owner@example.com", "https://example.com/b").await.unwrap();

    let paid =
        ctx.manager.create_paid_monitor("owner@example.com", "https://example.com/c").await.unwrap();
    assert!(paid.paid);

    // Paid monitors do not count against the free quota.
    let usage = ctx.manager.free_usage("owner@example.com").await.unwrap();
    assert_eq!(usage.used, 2);
    assert_eq!(ctx.store.active_ids().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_duplicate_payment_event_creates_duplicate_monitor() {
    // Exactly-once creation is not guaranteed; a redelivered event makes a
    // second record.
    let ctx = setup();

    let first =
        ctx.manager.create_paid_monitor("owner@example.com", "https://example.com/c").await.unwrap();
    let second =
        ctx.manager.create_paid_monitor("owner@example.com", "https://example.com/c").await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(ctx.store.ids_owned_by("owner@example.com").await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_rejects_invalid_url() {
    let ctx = setup();

    for url in ["ftp://example.com", "not a url", "javascript:alert(1)"] {
        let result = ctx.manager.create_free_monitor("owner@example.com", url).await;
        assert!(matches!(result, Err(MonitorError::InvalidUrl)), "expected {url:?} to be rejected");
    }

    assert!(ctx.store.active_ids().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_rejects_invalid_email() {
    let ctx = setup();

    let result = ctx.manager.create_free_monitor("not-an-email", "https://example.com").await;
    assert!(matches!(result, Err(MonitorError::InvalidEmail)));
}

#[tokio::test]
async fn test_welcome_email_is_sent_with_page_title() {
    let ctx = setup();
    ctx.fetcher.set_page(
        "https://example.com/jobs",
        "<html><head><title>Senior Rust Engineer</title></head><body>text</body></html>",
    );

    ctx.manager.create_free_monitor("owner@example.com", "https://example.com/jobs").await.unwrap();

    let sent = ctx.sink.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "owner@example.com");
    assert_eq!(sent[0].subject, "Now monitoring: Senior Rust Engineer");
    assert!(sent[0].body.contains("https://example.com/jobs"));
}

#[tokio::test]
async fn test_welcome_email_failure_does_not_fail_creation() {
    let ctx = setup();
    ctx.sink.set_failing(true);

    let result = ctx.manager.create_free_monitor("owner@example.com", "https://example.com").await;

    assert!(result.is_ok());
    assert_eq!(ctx.store.active_ids().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_missing_monitor_fails_not_found() {
    let ctx = setup();

    let result = ctx.manager.delete_monitor("owner@example.com", "no-such-id").await;
    assert!(matches!(result, Err(MonitorError::NotFound)));
}

#[tokio::test]
async fn test_delete_by_non_owner_fails_and_leaves_state_untouched() {
    let ctx = setup();

    let monitor =
        ctx.manager.create_free_monitor("owner@example.com", "https://example.com").await.unwrap();

    let result = ctx.manager.delete_monitor("intruder@example.com", &monitor.id).await;
    assert!(matches!(result, Err(MonitorError::NotOwner)));

    assert!(ctx.store.get(&monitor.id).await.unwrap().is_some());
    assert_eq!(ctx.store.active_ids().await.unwrap(), vec![monitor.id.clone()]);
    assert_eq!(ctx.store.ids_owned_by("owner@example.com").await.unwrap(), vec![monitor.id]);
}

#[tokio::test]
async fn test_delete_removes_record_and_both_indices() {
    let ctx = setup();

    let monitor =
        ctx.manager.create_free_monitor("owner@example.com", "https://example.com").await.unwrap();

    // Ownership comparison is case-insensitive.
    ctx.manager.delete_monitor("Owner@Example.com", &monitor.id).await.unwrap();

    assert!(ctx.store.get(&monitor.id).await.unwrap().is_none());
    assert!(ctx.store.active_ids().await.unwrap().is_empty());
    assert!(ctx.store.ids_owned_by("owner@example.com").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_deleting_frees_quota() {
    let ctx = setup();

    let monitor =
        ctx.manager.create_free_monitor("owner@example.com", "https://example.com/a").await.unwrap();
    ctx.manager.create_free_monitor("owner@example.com", "https://example.com/b").await.unwrap();
    ctx.manager.delete_monitor("owner@example.com", &monitor.id).await.unwrap();

    assert!(ctx.manager.create_free_monitor("owner@example.com", "https://example.com/c").await.is_ok());
}

#[tokio::test]
async fn test_list_monitors_newest_first() {
    let ctx = setup();
    let now = Utc::now();

    let older = MonitorBuilder::new()
        .id("older")
        .owner_email("owner@example.com")
        .created_at(now - Duration::hours(2))
        .build();
    let newer = MonitorBuilder::new()
        .id("newer")
        .owner_email("owner@example.com")
        .created_at(now)
        .last_fingerprint("deadbeef")
        .build();

    for monitor in [&older, &newer] {
        ctx.store.save(monitor).await.unwrap();
        ctx.store.index(monitor).await.unwrap();
    }

    let overviews = ctx.manager.list_monitors("owner@example.com").await.unwrap();

    assert_eq!(overviews.len(), 2);
    assert_eq!(overviews[0].id, "newer");
    assert!(overviews[0].has_fingerprint);
    assert_eq!(overviews[1].id, "older");
    assert!(!overviews[1].has_fingerprint);
}
