use super::domain::{Region, YearRecord};
use super::metrics::{compute_metrics, Metrics};
use super::trend::{compute_region_trend, Trend};
use super::urgency::{urgency_breakdown, UrgencyBreakdown};
use serde::Serialize;

/// Everything the engine derives for one region in one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionAnalysis {
    pub year: i32,
    pub record: YearRecord,
    pub metrics: Metrics,
    pub trend: Trend,
    pub urgency: UrgencyBreakdown,
}

/// Returns `None` when the region has no record for `year`.
pub fn analyze_region(region: &Region, year: i32) -> Option<RegionAnalysis> {
    let record = *region.record(year)?;
    let metrics = compute_metrics(&record);
    let trend = compute_region_trend(region);
    let urgency = urgency_breakdown(&metrics, &trend);

    Some(RegionAnalysis {
        year,
        record,
        metrics,
        trend,
        urgency,
    })
}
