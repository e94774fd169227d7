//! Read-only catalog of report definitions.
//!
//! Loaded once at startup from a JSON file mapping report id to definition,
//! then injected into whatever needs it. Nothing reads the catalog through a
//! global, and nothing mutates it after load.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::ReportDefinition;

#[derive(Debug, Clone, Default)]
pub struct ReportCatalog {
    reports: HashMap<String, ReportDefinition>,
}

impl ReportCatalog {
    pub fn new(reports: HashMap<String, ReportDefinition>) -> Self {
        Self { reports }
    }

    /// Parse a catalog from its JSON form: an object mapping id to
    /// definition.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let reports: HashMap<String, ReportDefinition> =
            serde_json::from_str(json).context("failed to parse report catalog JSON")?;
        Ok(Self { reports })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report catalog at {}", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn get(&self, id: &str) -> Option<&ReportDefinition> {
        self.reports.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.reports.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReportData;

    #[test]
    fn parses_raw_rows_and_preaggregated_entries() {
        let json = r#"{
            "q1-2026": {
                "id": "q1-2026",
                "title": "Q1 2026 traffic",
                "period": "Q1 2026",
                "data": [
                    {"month": "2026-01", "totalVisitors": 1000, "pageviews": 3000,
                     "avgSessionDuration": "2m 0s", "bounceRate": "40%"}
                ]
            },
            "q4-wrap": {
                "id": "q4-wrap",
                "title": "Q4 wrap-up",
                "period": "Q4 2025",
                "data": {"totalVisitors": 5000, "pageviews": 12000,
                         "avgSessionDuration": "3m 10s", "bounceRate": "35.2%"},
                "aiSummary": "<p>Strong close to the year.</p>"
            }
        }"#;

        let catalog = ReportCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 2);

        match &catalog.get("q1-2026").unwrap().data {
            ReportData::Rows(rows) => assert_eq!(rows.len(), 1),
            other => panic!("expected raw rows, got {:?}", other),
        }
        match &catalog.get("q4-wrap").unwrap().data {
            ReportData::Summary(summary) => assert_eq!(summary.total_visitors, 5000),
            other => panic!("expected summary, got {:?}", other),
        }
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn tolerates_messy_metric_cells() {
        let json = r#"{
            "messy": {
                "id": "messy",
                "title": "Messy export",
                "period": "2026",
                "data": [
                    {"month": "2026-01", "totalVisitors": 10, "pageviews": 20,
                     "avgSessionDuration": null, "bounceRate": 38}
                ]
            }
        }"#;
        let catalog = ReportCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 1);
    }
}
