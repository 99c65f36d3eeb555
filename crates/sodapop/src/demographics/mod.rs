pub mod analysis;
pub mod domain;
pub mod hierarchy;
pub mod metrics;
pub mod ranking;
pub mod reference;
pub mod report;
pub mod source;
pub mod thresholds;
pub mod trend;
pub mod urgency;

pub use analysis::{analyze_region, RegionAnalysis};
pub use domain::{AdminLevel, Region, RegionCode, SettlementType, YearRecord};
pub use metrics::{compute_metrics, Metrics};
pub use ranking::{
    rank_regions, rank_regions_by, summarize_regions, summarize_regions_by, RankBy, RankedRegion,
    RankingSummary,
};
pub use reference::{compare_to_reference, DeviationSeverity, NationalReference, ReferenceComparison};
pub use report::{
    compare_regions, synthesize_report, trend_alert, RegionComparison, RegionReport, TrendAlert,
};
pub use source::{
    CsvRegionLoader, DataSourceError, InMemoryRegionSource, RegionDataSource,
    SyntheticRegionGenerator,
};
pub use trend::{compute_cagr, compute_region_trend, Trend};
pub use urgency::{compute_urgency, urgency_breakdown, UrgencyBreakdown, UrgencyLevel};
