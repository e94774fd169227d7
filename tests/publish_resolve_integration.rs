//! Publish/resolve lifecycle tests
//!
//! These tests exercise the full snapshot lifecycle against in-memory SQLite
//! storage: publishing immutable snapshots, resolving them through the public
//! resolver, and the time-based transition from valid to expired.

use chrono::{Duration, TimeZone, Utc};
use reportshare::models::{MetricField, RawMonthlyMetric};
use reportshare::report::aggregator;
use reportshare::report::{LinkPublisher, PublicResolver, PublishPayload, ResolveOutcome};
use reportshare::storage::{SnapshotStore, SqliteStore};
use std::sync::Arc;

/// Helper to create test storage
async fn create_test_store() -> Arc<dyn SnapshotStore> {
    let store = SqliteStore::new("sqlite::memory:", 1).await.unwrap();
    store.init().await.unwrap();
    Arc::new(store)
}

fn row(month: &str, visitors: u64, pageviews: u64, duration: &str, bounce: &str) -> RawMonthlyMetric {
    RawMonthlyMetric {
        month: month.to_string(),
        total_visitors: visitors,
        pageviews,
        avg_session_duration: MetricField::Text(duration.to_string()),
        bounce_rate: MetricField::Text(bounce.to_string()),
    }
}

fn quarter_rows() -> Vec<RawMonthlyMetric> {
    vec![
        row("2026-01", 1000, 3000, "2m 0s", "40%"),
        row("2026-02", 1200, 3200, "2m 30s", "38%"),
        row("2026-03", 1100, 3100, "1m 50s", "42%"),
    ]
}

fn quarter_payload() -> PublishPayload {
    let rows = quarter_rows();
    let summary = aggregator::aggregate(&rows, None);
    PublishPayload {
        title: "Q1 2026 traffic".to_string(),
        period: "Q1 2026".to_string(),
        summary,
        raw_data: Some(rows),
        narrative: Some("<p>Strong quarter.</p>".to_string()),
    }
}

#[tokio::test]
async fn publish_then_resolve_returns_the_snapshot() {
    let store = create_test_store().await;
    let publisher = LinkPublisher::new(Arc::clone(&store), LinkPublisher::DEFAULT_TTL_DAYS);
    let resolver = PublicResolver::new(Arc::clone(&store));

    let now = Utc.with_ymd_and_hms(2026, 4, 1, 12, 0, 0).unwrap();
    let link = publisher.publish_at(quarter_payload(), now).await.unwrap();

    assert_eq!(link.url, format!("/reports/view/{}", link.id));
    assert_eq!(link.expires, now + Duration::days(30));

    match resolver.resolve_at(&link.id, now).await.unwrap() {
        ResolveOutcome::Found(report) => {
            assert_eq!(report.id, link.id);
            assert_eq!(report.title, "Q1 2026 traffic");
            assert_eq!(report.period, "Q1 2026");
            assert_eq!(report.data.total_visitors, 3300);
            assert_eq!(report.data.pageviews, 9300);
            assert_eq!(report.data.avg_session_duration, "2m 7s");
            assert_eq!(report.data.bounce_rate, "40.0%");
            assert_eq!(report.ai_summary.as_deref(), Some("<p>Strong quarter.</p>"));
            assert_eq!(report.raw_data.unwrap().len(), 3);
            assert_eq!(report.created_at, now);
            assert_eq!(report.expires, now + Duration::days(30));
        }
        other => panic!("expected Found, got {:?}", other),
    }
}

#[tokio::test]
async fn publish_is_not_idempotent() {
    // Two recipients generating a link from the same source must each get
    // their own independent snapshot.
    let store = create_test_store().await;
    let publisher = LinkPublisher::new(Arc::clone(&store), 30);
    let resolver = PublicResolver::new(Arc::clone(&store));

    let first = publisher.publish(quarter_payload()).await.unwrap();
    let second = publisher.publish(quarter_payload()).await.unwrap();

    assert_ne!(first.id, second.id);
    for link in [&first, &second] {
        assert!(matches!(
            resolver.resolve(&link.id).await.unwrap(),
            ResolveOutcome::Found(_)
        ));
    }
}

#[tokio::test]
async fn unknown_id_resolves_not_found() {
    let store = create_test_store().await;
    let resolver = PublicResolver::new(store);

    let outcome = resolver.resolve("doesNotExist").await.unwrap();
    assert_eq!(outcome, ResolveOutcome::NotFound);
}

#[tokio::test]
async fn snapshot_expires_after_its_ttl() {
    let store = create_test_store().await;
    let publisher = LinkPublisher::new(Arc::clone(&store), 30);
    let resolver = PublicResolver::new(Arc::clone(&store));

    let created_at = Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap();
    let link = publisher
        .publish_at(quarter_payload(), created_at)
        .await
        .unwrap();

    // Still valid one day before expiry.
    let outcome = resolver
        .resolve_at(&link.id, created_at + Duration::days(29))
        .await
        .unwrap();
    assert!(matches!(outcome, ResolveOutcome::Found(_)));

    // Gone one day after expiry, reporting when it lapsed.
    let outcome = resolver
        .resolve_at(&link.id, created_at + Duration::days(31))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        ResolveOutcome::Expired {
            expired_at: created_at + Duration::days(30)
        }
    );
}

#[tokio::test]
async fn snapshot_is_isolated_from_later_source_edits() {
    let store = create_test_store().await;
    let publisher = LinkPublisher::new(Arc::clone(&store), 30);
    let resolver = PublicResolver::new(Arc::clone(&store));

    let mut rows = quarter_rows();
    let payload = PublishPayload {
        title: "Q1 2026 traffic".to_string(),
        period: "Q1 2026".to_string(),
        summary: aggregator::aggregate(&rows, None),
        raw_data: Some(rows.clone()),
        narrative: None,
    };
    let link = publisher.publish(payload).await.unwrap();

    // Edit the source data after publishing, the way a catalog update would.
    rows[0].total_visitors = 999_999;
    let _edited_summary = aggregator::aggregate(&rows, None);

    match resolver.resolve(&link.id).await.unwrap() {
        ResolveOutcome::Found(report) => {
            assert_eq!(report.data.total_visitors, 3300);
            assert_eq!(report.raw_data.unwrap()[0].total_visitors, 1000);
        }
        other => panic!("expected Found, got {:?}", other),
    }
}

#[tokio::test]
async fn ttl_is_configurable() {
    let store = create_test_store().await;
    let publisher = LinkPublisher::new(Arc::clone(&store), 7);
    let resolver = PublicResolver::new(Arc::clone(&store));

    let created_at = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
    let link = publisher
        .publish_at(quarter_payload(), created_at)
        .await
        .unwrap();

    assert_eq!(link.expires, created_at + Duration::days(7));
    let outcome = resolver
        .resolve_at(&link.id, created_at + Duration::days(8))
        .await
        .unwrap();
    assert!(matches!(outcome, ResolveOutcome::Expired { .. }));
}
