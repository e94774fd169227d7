mod report;

pub use report::{
    MetricField, MonthRange, RawMonthlyMetric, ReportData, ReportDefinition, ReportSummary,
    SavedReport,
};
