//! Templated narrative paragraph for a report summary.

use crate::models::ReportSummary;

/// Build the human-readable summary paragraph as an HTML fragment.
///
/// Deterministic and side-effect free: the same summary always produces the
/// same text, so callers may re-run it freely for previews.
pub fn compose(summary: &ReportSummary) -> String {
    format!(
        "<p>Over this period the site attracted <strong>{}</strong> visitors \
         who generated <strong>{}</strong> pageviews. Visitors stayed for an \
         average of <strong>{}</strong> per session, and the bounce rate was \
         <strong>{}</strong>.</p>",
        format_thousands(summary.total_visitors),
        format_thousands(summary.pageviews),
        summary.avg_session_duration,
        summary.bounce_rate,
    )
}

/// Group digits with commas, e.g. `1234567` → `"1,234,567"`.
fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
