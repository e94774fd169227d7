//! Publishing of immutable, time-limited report snapshots.

use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::{DateTime, Duration, Utc};
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{RawMonthlyMetric, ReportSummary, SavedReport};
use crate::storage::{SnapshotStore, StorageError};

/// Length of a generated snapshot id. 12 alphanumeric characters give
/// 62^12 possible ids, so collisions between independently generated links
/// are negligible.
const SNAPSHOT_ID_LEN: usize = 12;

/// How many fresh ids to try if the store reports a key conflict.
const MAX_ID_ATTEMPTS: usize = 5;

/// What the editor hands over for publishing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishPayload {
    pub title: String,
    pub period: String,
    pub summary: ReportSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<Vec<RawMonthlyMetric>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
}

/// Result of a publish: where the snapshot lives and until when.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedLink {
    pub id: String,
    pub url: String,
    pub expires: DateTime<Utc>,
}

/// Writes immutable snapshots through a [`SnapshotStore`].
///
/// Each publish creates a brand-new record under a fresh random id — never an
/// update, and deliberately not idempotent: two recipients generating a link
/// from the same source each get their own independent snapshot.
#[derive(Clone)]
pub struct LinkPublisher {
    store: Arc<dyn SnapshotStore>,
    ttl: Duration,
}

impl LinkPublisher {
    pub const DEFAULT_TTL_DAYS: i64 = 30;

    pub fn new(store: Arc<dyn SnapshotStore>, ttl_days: i64) -> Self {
        Self {
            store,
            ttl: Duration::days(ttl_days),
        }
    }

    pub async fn publish(&self, payload: PublishPayload) -> Result<PublishedLink> {
        self.publish_at(payload, Utc::now()).await
    }

    /// Publish with an explicit clock. The snapshot is written once with
    /// `expires = now + TTL` and never referenced back to its source.
    pub async fn publish_at(
        &self,
        payload: PublishPayload,
        now: DateTime<Utc>,
    ) -> Result<PublishedLink> {
        let expires = now + self.ttl;

        for _ in 0..MAX_ID_ATTEMPTS {
            let id = generate_snapshot_id();
            let report = SavedReport {
                id: id.clone(),
                title: payload.title.clone(),
                period: payload.period.clone(),
                data: payload.summary.clone(),
                raw_data: payload.raw_data.clone(),
                ai_summary: payload.narrative.clone(),
                created_at: now,
                expires,
            };

            match self.store.put(&report).await {
                Ok(()) => {
                    info!(snapshot_id = %id, %expires, "published report snapshot");
                    return Ok(PublishedLink {
                        url: format!("/reports/view/{id}"),
                        id,
                        expires,
                    });
                }
                Err(StorageError::Conflict) => continue,
                Err(StorageError::Other(e)) => return Err(e),
            }
        }

        bail!("failed to generate a unique snapshot id after {MAX_ID_ATTEMPTS} attempts")
    }
}

fn generate_snapshot_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SNAPSHOT_ID_LEN)
        .map(char::from)
        .collect()
}
