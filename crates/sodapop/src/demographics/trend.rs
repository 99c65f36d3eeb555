use super::domain::{Region, YearRecord};
use super::metrics::compute_metrics;
use serde::Serialize;

/// Compound annual growth rate in percent.
///
/// Returns 0 when `start_value <= 0` or `periods <= 0`, where the rate is
/// undefined.
pub fn compute_cagr(start_value: f64, end_value: f64, periods: f64) -> f64 {
    if start_value <= 0.0 || periods <= 0.0 {
        return 0.0;
    }
    ((end_value / start_value).powf(1.0 / periods) - 1.0) * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    RapidIncrease,
    ModerateIncrease,
    #[default]
    Stable,
    ModerateDecrease,
    RapidDecrease,
}

impl TrendDirection {
    pub fn classify(velocity: f64) -> Self {
        if velocity > 5.0 {
            Self::RapidIncrease
        } else if velocity > 2.0 {
            Self::ModerateIncrease
        } else if velocity > -2.0 {
            Self::Stable
        } else if velocity > -5.0 {
            Self::ModerateDecrease
        } else {
            Self::RapidDecrease
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::RapidIncrease => "급격히 증가",
            Self::ModerateIncrease => "꾸준히 증가",
            Self::Stable => "안정적 추이",
            Self::ModerateDecrease => "점진적 감소",
            Self::RapidDecrease => "급격히 감소",
        }
    }
}

/// Multi-year growth measures between a region's earliest and latest year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Trend {
    pub start_year: i32,
    pub end_year: i32,
    /// CAGR of the 65+ population, %/yr.
    pub aging_velocity: f64,
    /// Net percentage change of total population over the span.
    pub population_change: f64,
    pub population_change_absolute: i64,
    pub old_old_velocity: f64,
    pub youth_velocity: f64,
    /// Percentage-point change of the dependency ratio.
    pub dependency_change: f64,
    pub old_old_acceleration: f64,
    pub direction: TrendDirection,
}

impl Trend {
    pub fn span_years(&self) -> i32 {
        self.end_year.saturating_sub(self.start_year)
    }
}

/// Computes the region's trend from its earliest and latest recorded years.
///
/// With fewer than two years every measure is 0.
pub fn compute_region_trend(region: &Region) -> Trend {
    let (first_year, first) = match region.data.first_key_value() {
        Some((year, record)) => (*year, record),
        None => return Trend::default(),
    };
    let (last_year, last) = match region.data.last_key_value() {
        Some((year, record)) if *year != first_year => (*year, record),
        _ => {
            return Trend {
                start_year: first_year,
                end_year: first_year,
                ..Trend::default()
            }
        }
    };

    let periods = year_span(first_year, last_year);
    let aging_velocity = compute_cagr(first.elderly as f64, last.elderly as f64, periods);
    let population_change_absolute = signed_change(first.total_population, last.total_population);
    let population_change = if first.total_population > 0 {
        population_change_absolute as f64 / first.total_population as f64 * 100.0
    } else {
        0.0
    };

    let trend = Trend {
        start_year: first_year,
        end_year: last_year,
        aging_velocity,
        population_change,
        population_change_absolute,
        old_old_velocity: compute_cagr(first.old_old as f64, last.old_old as f64, periods),
        youth_velocity: compute_cagr(
            young_count(first) as f64,
            young_count(last) as f64,
            periods,
        ),
        dependency_change: compute_metrics(last).dependency_ratio
            - compute_metrics(first).dependency_ratio,
        old_old_acceleration: old_old_acceleration(region),
        direction: TrendDirection::classify(aging_velocity),
    };

    tracing::trace!(
        region = %region.code,
        start = trend.start_year,
        end = trend.end_year,
        velocity = trend.aging_velocity,
        "computed region trend"
    );
    trend
}

fn young_count(record: &YearRecord) -> u64 {
    record.children.saturating_add(record.youth)
}

fn year_span(from: i32, to: i32) -> f64 {
    f64::from(to) - f64::from(from)
}

/// `to - from` as a signed count, clamped to the `i64` range.
fn signed_change(from: u64, to: u64) -> i64 {
    let change = i128::from(to) - i128::from(from);
    i64::try_from(change).unwrap_or(if change < 0 { i64::MIN } else { i64::MAX })
}

/// Second-half minus first-half old-old CAGR, split at the median year.
fn old_old_acceleration(region: &Region) -> f64 {
    let years = region.years();
    if years.len() < 3 {
        return 0.0;
    }

    let first_year = years[0];
    let mid_year = years[years.len() / 2];
    let last_year = years[years.len() - 1];
    let old_old = |year: i32| region.data.get(&year).map_or(0.0, |r| r.old_old as f64);

    let first_half = compute_cagr(
        old_old(first_year),
        old_old(mid_year),
        year_span(first_year, mid_year),
    );
    let second_half = compute_cagr(
        old_old(mid_year),
        old_old(last_year),
        year_span(mid_year, last_year),
    );
    second_half - first_half
}

/// Change between two consecutive recorded years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearOverYearChange {
    pub year: i32,
    pub previous_year: i32,
    pub population_change: i64,
    pub population_change_pct: f64,
    pub elderly_change: i64,
    pub elderly_change_pct: f64,
    pub aging_ratio_change: f64,
    pub old_old_change: i64,
}

pub fn year_over_year(region: &Region) -> Vec<YearOverYearChange> {
    let records: Vec<(&i32, &YearRecord)> = region.data.iter().collect();

    records
        .windows(2)
        .map(|pair| {
            let (previous_year, previous) = pair[0];
            let (year, current) = pair[1];
            let population_change =
                signed_change(previous.total_population, current.total_population);
            let elderly_change = signed_change(previous.elderly, current.elderly);

            YearOverYearChange {
                year: *year,
                previous_year: *previous_year,
                population_change,
                population_change_pct: percent_of(population_change, previous.total_population),
                elderly_change,
                elderly_change_pct: percent_of(elderly_change, previous.elderly),
                aging_ratio_change: compute_metrics(current).aging_ratio
                    - compute_metrics(previous).aging_ratio,
                old_old_change: signed_change(previous.old_old, current.old_old),
            }
        })
        .collect()
}

fn percent_of(change: i64, base: u64) -> f64 {
    if base == 0 {
        0.0
    } else {
        change as f64 / base as f64 * 100.0
    }
}
