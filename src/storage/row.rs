//! Row mapping shared by the SQL backends.
//!
//! Summary and raw series are stored as JSON text, timestamps as RFC 3339
//! UTC text truncated to whole seconds. With a fixed format, `expires`
//! comparisons in SQL reduce to plain string comparison.

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::FromRow;

use crate::models::{RawMonthlyMetric, ReportSummary, SavedReport};

#[derive(Debug, FromRow)]
pub struct SavedReportRow {
    pub id: String,
    pub title: String,
    pub period: String,
    pub summary: String,
    pub raw_data: Option<String>,
    pub ai_summary: Option<String>,
    pub created_at: String,
    pub expires: String,
}

pub fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn decode_timestamp(text: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(text)
        .with_context(|| format!("invalid stored timestamp {text:?}"))?;
    Ok(parsed.with_timezone(&Utc))
}

pub fn encode_summary(summary: &ReportSummary) -> Result<String> {
    serde_json::to_string(summary).context("failed to serialize report summary")
}

pub fn encode_raw_data(raw: Option<&[RawMonthlyMetric]>) -> Result<Option<String>> {
    raw.map(|rows| serde_json::to_string(rows).context("failed to serialize raw metric rows"))
        .transpose()
}

impl SavedReportRow {
    pub fn into_report(self) -> Result<SavedReport> {
        let data: ReportSummary =
            serde_json::from_str(&self.summary).context("invalid stored report summary")?;
        let raw_data: Option<Vec<RawMonthlyMetric>> = self
            .raw_data
            .as_deref()
            .map(|json| serde_json::from_str(json).context("invalid stored raw metric rows"))
            .transpose()?;

        Ok(SavedReport {
            id: self.id,
            title: self.title,
            period: self.period,
            data,
            raw_data,
            ai_summary: self.ai_summary,
            created_at: decode_timestamp(&self.created_at)?,
            expires: decode_timestamp(&self.expires)?,
        })
    }
}
