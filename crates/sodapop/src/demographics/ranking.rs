use super::domain::RegionCode;
use super::metrics::compute_metrics;
use super::source::RegionDataSource;
use super::trend::compute_region_trend;
use super::urgency::{urgency_breakdown, UrgencyLevel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Measure a ranking is ordered by, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankBy {
    #[default]
    Urgency,
    AgingVelocity,
    OldOldVelocity,
}

impl RankBy {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Urgency => "복지 긴급도",
            Self::AgingVelocity => "고령화 속도",
            Self::OldOldVelocity => "후기고령 증가 속도",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "urgency" | "urgency_score" => Some(Self::Urgency),
            "aging_velocity" | "velocity" => Some(Self::AgingVelocity),
            "old_old_velocity" => Some(Self::OldOldVelocity),
            _ => None,
        }
    }

    fn key(self, entry: &RankedRegion) -> f64 {
        match self {
            Self::Urgency => entry.score,
            Self::AgingVelocity => entry.aging_velocity,
            Self::OldOldVelocity => entry.old_old_velocity,
        }
    }
}

/// A region's position in a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRegion {
    pub rank: usize,
    pub code: RegionCode,
    pub name: String,
    pub score: f64,
    pub level: UrgencyLevel,
    pub aging_ratio: f64,
    pub aging_velocity: f64,
    pub old_old_velocity: f64,
    pub population: u64,
}

/// Scores every non-aggregate region with data for `year`, highest urgency
/// first, truncated to `limit`.
///
/// Regions without a record for `year` are omitted. Ties keep the source's
/// iteration order.
pub fn rank_regions(source: &dyn RegionDataSource, year: i32, limit: usize) -> Vec<RankedRegion> {
    rank_regions_by(source, year, limit, RankBy::Urgency)
}

/// Like [`rank_regions`], ordered by `by` instead of urgency.
pub fn rank_regions_by(
    source: &dyn RegionDataSource,
    year: i32,
    limit: usize,
    by: RankBy,
) -> Vec<RankedRegion> {
    let mut ranked = score_regions(source, year, by);
    ranked.truncate(limit);
    ranked
}

/// Ranking over all eligible regions together with its summary statistics.
pub fn summarize_regions(
    source: &dyn RegionDataSource,
    year: i32,
    limit: usize,
) -> (Vec<RankedRegion>, RankingSummary) {
    summarize_regions_by(source, year, limit, RankBy::Urgency)
}

pub fn summarize_regions_by(
    source: &dyn RegionDataSource,
    year: i32,
    limit: usize,
    by: RankBy,
) -> (Vec<RankedRegion>, RankingSummary) {
    let mut ranked = score_regions(source, year, by);
    let summary = RankingSummary::from_ranking(year, &ranked);
    ranked.truncate(limit);
    (ranked, summary)
}

fn score_regions(source: &dyn RegionDataSource, year: i32, by: RankBy) -> Vec<RankedRegion> {
    let mut skipped_aggregates = 0usize;
    let mut missing_year = 0usize;

    let mut ranked: Vec<RankedRegion> = source
        .regions()
        .filter_map(|region| {
            if region.code.is_aggregate() {
                skipped_aggregates += 1;
                return None;
            }
            let Some(record) = region.record(year) else {
                missing_year += 1;
                return None;
            };

            let metrics = compute_metrics(record);
            let trend = compute_region_trend(region);
            let urgency = urgency_breakdown(&metrics, &trend);

            Some(RankedRegion {
                rank: 0,
                code: region.code.clone(),
                name: region.name.clone(),
                score: urgency.total,
                level: urgency.level,
                aging_ratio: metrics.aging_ratio,
                aging_velocity: trend.aging_velocity,
                old_old_velocity: trend.old_old_velocity,
                population: record.total_population,
            })
        })
        .collect();

    // `sort_by` is stable, so equal keys keep iteration order.
    ranked.sort_by(|a, b| by.key(b).total_cmp(&by.key(a)));
    for (index, entry) in ranked.iter_mut().enumerate() {
        entry.rank = index + 1;
    }

    debug!(
        year,
        ranked = ranked.len(),
        skipped_aggregates,
        missing_year,
        rank_by = ?by,
        "ranked regions"
    );
    ranked
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelCount {
    pub level: UrgencyLevel,
    pub level_label: &'static str,
    pub regions: usize,
}

/// Spread of aging velocity across a ranking, in %/yr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct VelocityStats {
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl VelocityStats {
    fn from_values(values: &[f64]) -> Self {
        let (Some(min), Some(max)) = (values.first(), values.last()) else {
            return Self::default();
        };
        let mean = mean(values);
        let variance = values
            .iter()
            .map(|value| (value - mean).powi(2))
            .sum::<f64>()
            / values.len() as f64;

        Self {
            mean,
            median: median(values),
            std_dev: variance.sqrt(),
            min: *min,
            max: *max,
        }
    }
}

/// Distribution of urgency scores and aging velocity across a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingSummary {
    pub year: i32,
    pub regions: usize,
    pub mean_score: f64,
    pub median_score: f64,
    pub max_score: f64,
    /// 90th-percentile urgency score; regions at or above it form the top decile.
    pub top_decile_threshold: f64,
    pub velocity: VelocityStats,
    pub level_distribution: Vec<LevelCount>,
}

impl RankingSummary {
    pub fn from_ranking(year: i32, ranked: &[RankedRegion]) -> Self {
        let mut scores: Vec<f64> = ranked.iter().map(|entry| entry.score).collect();
        scores.sort_by(f64::total_cmp);
        let mut velocities: Vec<f64> = ranked.iter().map(|entry| entry.aging_velocity).collect();
        velocities.sort_by(f64::total_cmp);

        let mut counts: BTreeMap<UrgencyLevel, usize> = BTreeMap::new();
        for entry in ranked {
            *counts.entry(entry.level).or_default() += 1;
        }
        let level_distribution = UrgencyLevel::ordered()
            .into_iter()
            .map(|level| LevelCount {
                level,
                level_label: level.label(),
                regions: counts.get(&level).copied().unwrap_or(0),
            })
            .collect();

        Self {
            year,
            regions: ranked.len(),
            mean_score: mean(&scores),
            median_score: median(&scores),
            max_score: scores.last().copied().unwrap_or(0.0),
            top_decile_threshold: percentile(&scores, 90.0),
            velocity: VelocityStats::from_values(&velocities),
            level_distribution,
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median of already sorted values.
fn median(sorted: &[f64]) -> f64 {
    match sorted.len() {
        0 => 0.0,
        len if len % 2 == 1 => sorted[len / 2],
        len => (sorted[len / 2 - 1] + sorted[len / 2]) / 2.0,
    }
}

/// Percentile of already sorted values, interpolating linearly between the
/// closest ranks.
fn percentile(sorted: &[f64], pct: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let position = (pct / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_interpolates_between_ranks() {
        let sorted = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert!((percentile(&sorted, 90.0) - 46.0).abs() < 1e-9);
        assert_eq!(percentile(&sorted, 100.0), 50.0);
        assert_eq!(percentile(&sorted, 0.0), 10.0);
        assert_eq!(percentile(&[7.0], 90.0), 7.0);
        assert_eq!(percentile(&[], 90.0), 0.0);
    }

    #[test]
    fn velocity_stats_use_population_deviation() {
        let stats = VelocityStats::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((stats.mean - 5.0).abs() < 1e-9);
        assert!((stats.std_dev - 2.0).abs() < 1e-9);
        assert!((stats.median - 4.5).abs() < 1e-9);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
        assert_eq!(VelocityStats::from_values(&[]), VelocityStats::default());
    }

    #[test]
    fn rank_by_parses_query_values() {
        assert_eq!(RankBy::from_label("aging-velocity"), Some(RankBy::AgingVelocity));
        assert_eq!(RankBy::from_label("urgency_score"), Some(RankBy::Urgency));
        assert_eq!(RankBy::from_label("OLD_OLD_VELOCITY"), Some(RankBy::OldOldVelocity));
        assert_eq!(RankBy::from_label("population"), None);
    }
}
