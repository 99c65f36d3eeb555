mod alert;
mod comparison;
mod narrative;
mod recommendations;
pub mod views;

pub use alert::{trend_alert, AlertLevel, TrendAlert};
pub use comparison::{compare_regions, ComparedRegion, RegionComparison};
pub use narrative::{detect_anomalies, national_comparisons, synthesize_report};
pub use views::RegionReport;
