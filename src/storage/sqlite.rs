use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::models::SavedReport;
use crate::storage::row::{encode_raw_data, encode_summary, encode_timestamp, SavedReportRow};
use crate::storage::{SnapshotStore, StorageError, StorageResult};

pub struct SqliteStore {
    pool: Arc<SqlitePool>,
}

impl SqliteStore {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self {
            pool: Arc::new(pool),
        })
    }
}

#[async_trait]
impl SnapshotStore for SqliteStore {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS saved_reports (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                period TEXT NOT NULL,
                summary TEXT NOT NULL,
                raw_data TEXT,
                ai_summary TEXT,
                created_at TEXT NOT NULL,
                expires TEXT NOT NULL
            )
            "#,
        )
        .execute(self.pool.as_ref())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_saved_reports_expires ON saved_reports(expires)")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn put(&self, report: &SavedReport) -> StorageResult<()> {
        let summary = encode_summary(&report.data)?;
        let raw_data = encode_raw_data(report.raw_data.as_deref())?;

        let result = sqlx::query(
            r#"
            INSERT INTO saved_reports (id, title, period, summary, raw_data, ai_summary, created_at, expires)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO NOTHING
            "#,
        )
        .bind(&report.id)
        .bind(&report.title)
        .bind(&report.period)
        .bind(summary)
        .bind(raw_data)
        .bind(report.ai_summary.as_deref())
        .bind(encode_timestamp(report.created_at))
        .bind(encode_timestamp(report.expires))
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| StorageError::Other(e.into()))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::Conflict);
        }

        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<SavedReport>> {
        let row = sqlx::query_as::<_, SavedReportRow>(
            r#"
            SELECT id, title, period, summary, raw_data, ai_summary, created_at, expires
            FROM saved_reports
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(SavedReportRow::into_report).transpose()
    }

    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM saved_reports WHERE expires < ?")
            .bind(encode_timestamp(cutoff))
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<SavedReport>> {
        let rows = sqlx::query_as::<_, SavedReportRow>(
            r#"
            SELECT id, title, period, summary, raw_data, ai_summary, created_at, expires
            FROM saved_reports
            ORDER BY created_at DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(SavedReportRow::into_report).collect()
    }
}
