use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::SavedReport;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("snapshot id already exists")]
    Conflict,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Keyed store for published report snapshots.
///
/// Snapshots are written once and never updated; there is deliberately no
/// update operation on this trait. Expired rows are only removed by the
/// admin sweep.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Initialize the storage (create tables, run migrations).
    async fn init(&self) -> Result<()>;

    /// Persist a new snapshot. A duplicate id yields `StorageError::Conflict`
    /// so the publisher can retry with a fresh one.
    async fn put(&self, report: &SavedReport) -> StorageResult<()>;

    /// Fetch a snapshot by id.
    async fn get(&self, id: &str) -> Result<Option<SavedReport>>;

    /// Delete every snapshot whose `expires` lies before `cutoff`, returning
    /// how many were removed.
    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> Result<u64>;

    /// List snapshots, newest first.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<SavedReport>>;
}
