mod report;
mod tracker;

pub use report::{ReportFormat, ReportRenderer, StatsReport, missing_template_placeholder};
pub use tracker::Tracker;
