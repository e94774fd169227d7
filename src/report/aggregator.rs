//! Reduction of monthly metric rows into a single summary.
//!
//! Pure and synchronous: the catalog holds at most a few dozen rows per
//! report, so this is a plain in-memory fold with no I/O.

use crate::models::{MonthRange, RawMonthlyMetric, ReportData, ReportDefinition, ReportSummary};
use crate::report::metrics;

/// Reduce `rows` (optionally filtered to an inclusive month range) into one
/// summary.
///
/// An empty filtered set yields the canonical zero summary, never an error.
pub fn aggregate(rows: &[RawMonthlyMetric], range: Option<&MonthRange>) -> ReportSummary {
    let selected: Vec<&RawMonthlyMetric> = rows
        .iter()
        .filter(|row| range.map_or(true, |r| r.contains(&row.month)))
        .collect();

    if selected.is_empty() {
        return ReportSummary::zero();
    }

    let count = selected.len() as f64;
    let total_visitors = selected.iter().map(|r| r.total_visitors).sum();
    let pageviews = selected.iter().map(|r| r.pageviews).sum();

    let duration_sum: u64 = selected
        .iter()
        .map(|r| metrics::parse_duration(&r.avg_session_duration))
        .sum();
    let mean_duration = (duration_sum as f64 / count).round() as u64;

    let bounce_sum: f64 = selected
        .iter()
        .map(|r| metrics::parse_bounce_rate(&r.bounce_rate))
        .sum();

    ReportSummary {
        total_visitors,
        pageviews,
        avg_session_duration: metrics::format_duration(mean_duration),
        bounce_rate: metrics::format_bounce_rate(bounce_sum / count),
    }
}

/// Resolve a catalog definition into a summary.
///
/// A pre-aggregated summary passes through untouched, even when a range is
/// supplied — such definitions are assumed already scoped to their period, so
/// the range only applies to raw rows.
pub fn resolve(definition: &ReportDefinition, range: Option<&MonthRange>) -> ReportSummary {
    match &definition.data {
        ReportData::Summary(summary) => summary.clone(),
        ReportData::Rows(rows) => aggregate(rows, range),
    }
}
