//! Lenient metric parsing and canonical formatting.
//!
//! Analytics exports feed this module free-form text. The shipped reports
//! coerce anything unparsable to zero rather than failing, so the public
//! parsers never error; the `_strict` variants carry the typed error for
//! callers that want to observe bad input.

use thiserror::Error;

use crate::models::MetricField;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricParseError {
    #[error("duration {0:?} does not match \"<minutes>m <seconds>s\"")]
    BadDuration(String),
    #[error("bounce rate {0:?} is not a percentage")]
    BadBounceRate(String),
    #[error("expected a string or number, got {0}")]
    WrongType(&'static str),
}

/// Parse a `"<minutes>m <seconds>s"` duration into seconds.
fn parse_duration_text(input: &str) -> Result<u64, MetricParseError> {
    let bad = || MetricParseError::BadDuration(input.to_string());

    let trimmed = input.trim();
    let (minutes, rest) = trimmed.split_once('m').ok_or_else(bad)?;
    let seconds = rest.trim_start().strip_suffix('s').ok_or_else(bad)?;

    let minutes: u64 = minutes.trim().parse().map_err(|_| bad())?;
    let seconds: u64 = seconds.trim().parse().map_err(|_| bad())?;
    Ok(minutes * 60 + seconds)
}

/// Strict duration parse: only a string in canonical form is accepted.
pub fn parse_duration_strict(input: &MetricField) -> Result<u64, MetricParseError> {
    match input {
        MetricField::Text(s) => parse_duration_text(s),
        MetricField::Number(_) => Err(MetricParseError::WrongType("number")),
        MetricField::Other(_) => Err(MetricParseError::WrongType("non-scalar value")),
    }
}

/// Lenient duration parse in seconds. Wrong type, malformed string, missing
/// units: all yield `0`. Never panics, never errors.
pub fn parse_duration(input: &MetricField) -> u64 {
    parse_duration_strict(input).unwrap_or(0)
}

/// Strict bounce-rate parse: a bare number, or a string with an optional
/// trailing `%`.
pub fn parse_bounce_rate_strict(input: &MetricField) -> Result<f64, MetricParseError> {
    match input {
        MetricField::Number(n) => Ok(*n),
        MetricField::Text(s) => s
            .trim()
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .map_err(|_| MetricParseError::BadBounceRate(s.clone())),
        MetricField::Other(_) => Err(MetricParseError::WrongType("non-scalar value")),
    }
}

/// Lenient bounce-rate parse as a 0–100 percentage. Numbers pass through
/// unchanged; anything unparsable yields `0`.
pub fn parse_bounce_rate(input: &MetricField) -> f64 {
    parse_bounce_rate_strict(input).unwrap_or(0.0)
}

/// Format seconds into the canonical `"<minutes>m <seconds>s"` form.
pub fn format_duration(seconds: u64) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}

/// Format a percentage with one decimal place and a trailing `%`.
pub fn format_bounce_rate(pct: f64) -> String {
    format!("{:.1}%", pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> MetricField {
        MetricField::Text(s.to_string())
    }

    #[test]
    fn parses_canonical_durations() {
        assert_eq!(parse_duration(&text("2m 30s")), 150);
        assert_eq!(parse_duration(&text("0m 45s")), 45);
        assert_eq!(parse_duration(&text("10m 0s")), 600);
    }

    #[test]
    fn tolerates_whitespace_variants() {
        assert_eq!(parse_duration(&text("2m30s")), 150);
        assert_eq!(parse_duration(&text("  2m  30s  ")), 150);
    }

    #[test]
    fn malformed_duration_coerces_to_zero() {
        assert_eq!(parse_duration(&text("unknown")), 0);
        assert_eq!(parse_duration(&text("2m")), 0);
        assert_eq!(parse_duration(&text("30s")), 0);
        assert_eq!(parse_duration(&text("")), 0);
        assert_eq!(parse_duration(&MetricField::Number(150.0)), 0);
        assert_eq!(parse_duration(&MetricField::Other(serde_json::Value::Null)), 0);
    }

    #[test]
    fn strict_duration_reports_the_offending_input() {
        assert_eq!(
            parse_duration_strict(&text("soon")),
            Err(MetricParseError::BadDuration("soon".to_string()))
        );
    }

    #[test]
    fn parses_bounce_rates() {
        assert_eq!(parse_bounce_rate(&text("38%")), 38.0);
        assert_eq!(parse_bounce_rate(&text("41.5%")), 41.5);
        assert_eq!(parse_bounce_rate(&text("40")), 40.0);
        assert_eq!(parse_bounce_rate(&MetricField::Number(42.0)), 42.0);
    }

    #[test]
    fn malformed_bounce_rate_coerces_to_zero() {
        assert_eq!(parse_bounce_rate(&text("n/a")), 0.0);
        assert_eq!(parse_bounce_rate(&text("")), 0.0);
        assert_eq!(parse_bounce_rate(&MetricField::Other(serde_json::Value::Bool(true))), 0.0);
    }

    #[test]
    fn formats_round_trip() {
        assert_eq!(format_duration(127), "2m 7s");
        assert_eq!(format_duration(0), "0m 0s");
        assert_eq!(format_duration(60), "1m 0s");
        assert_eq!(format_bounce_rate(40.0), "40.0%");
        assert_eq!(format_bounce_rate(38.333), "38.3%");
    }
}
