use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A free-form metric cell as it appears in catalog JSON.
///
/// Analytics exports are not consistent about types: bounce rate shows up as
/// `38` or `"38%"`, durations as `"2m 30s"` or `"n/a"`. Deserialization
/// tolerates anything; the lenient parsers in `report::metrics` decide what a
/// value is worth (zero, if nothing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricField {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

/// One calendar month of traffic, immutable once recorded in the catalog.
///
/// `month` is zero-padded `"YYYY-MM"`, so plain string comparison orders
/// months correctly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMonthlyMetric {
    pub month: String,
    pub total_visitors: u64,
    pub pageviews: u64,
    pub avg_session_duration: MetricField,
    pub bounce_rate: MetricField,
}

/// Aggregate over zero or more monthly rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_visitors: u64,
    pub pageviews: u64,
    /// Canonical `"<minutes>m <seconds>s"` form.
    pub avg_session_duration: String,
    /// Percentage with a trailing `%`.
    pub bounce_rate: String,
}

impl ReportSummary {
    /// The canonical empty aggregate. Summing over no rows yields this,
    /// never an error.
    pub fn zero() -> Self {
        Self {
            total_visitors: 0,
            pageviews: 0,
            avg_session_duration: "0m 0s".to_string(),
            bounce_rate: "0%".to_string(),
        }
    }
}

/// Payload of a catalog entry: either raw monthly rows still needing
/// aggregation, or a pre-computed summary.
///
/// Serialized untagged to keep the existing wire shape — a JSON array is raw
/// rows, an object carrying `totalVisitors` is a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportData {
    Rows(Vec<RawMonthlyMetric>),
    Summary(ReportSummary),
}

/// A named report definition from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDefinition {
    pub id: String,
    pub title: String,
    /// Display string, e.g. `"Q1 2026"`.
    pub period: String,
    pub data: ReportData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
}

/// Inclusive `[start, end]` month-string bound for selecting raw rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRange {
    pub start: String,
    pub end: String,
}

impl MonthRange {
    pub fn contains(&self, month: &str) -> bool {
        self.start.as_str() <= month && month <= self.end.as_str()
    }
}

/// An immutable published snapshot.
///
/// Created once by the publisher, read-only forever after. Its `id` is fresh
/// and independent of the source definition, and later edits to that
/// definition never touch an existing snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedReport {
    pub id: String,
    pub title: String,
    pub period: String,
    /// Always fully resolved at publish time; never raw rows needing
    /// further aggregation.
    pub data: ReportSummary,
    /// Raw series kept only for chart rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<Vec<RawMonthlyMetric>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}
