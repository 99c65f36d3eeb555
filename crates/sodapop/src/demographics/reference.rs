use super::metrics::Metrics;
use super::thresholds::{DEVIATION_ELEVATED, DEVIATION_SEVERE};
use super::trend::Trend;
use serde::{Deserialize, Serialize};

/// Nation-wide comparison baseline for the current reporting year.
///
/// Supplied as static input; the engine never derives it from region data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NationalReference {
    pub aging_ratio: f64,
    pub old_old_ratio: f64,
    pub dependency_ratio: f64,
    pub aging_velocity: f64,
    /// 75+ as a share of the total population.
    pub old_old_share: f64,
}

impl NationalReference {
    /// Statistics Korea estimates for 2024.
    pub const KOREA_2024: Self = Self {
        aging_ratio: 19.2,
        old_old_ratio: 42.5,
        dependency_ratio: 45.0,
        aging_velocity: 4.2,
        old_old_share: 6.8,
    };
}

impl Default for NationalReference {
    fn default() -> Self {
        Self::KOREA_2024
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviationSeverity {
    Normal,
    Elevated,
    Severe,
}

impl DeviationSeverity {
    pub fn classify(total_deviation: f64) -> Self {
        if total_deviation > DEVIATION_SEVERE {
            Self::Severe
        } else if total_deviation > DEVIATION_ELEVATED {
            Self::Elevated
        } else {
            Self::Normal
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "평균 수준",
            Self::Elevated => "주의 필요",
            Self::Severe => "심각한 편차",
        }
    }
}

/// How far a region sits from the national baseline, in percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceComparison {
    pub aging_ratio_diff: f64,
    pub aging_velocity_diff: f64,
    pub old_old_ratio_diff: f64,
    /// Sum of the absolute differences above.
    pub total_deviation: f64,
    pub severity: DeviationSeverity,
}

pub fn compare_to_reference(
    metrics: &Metrics,
    trend: &Trend,
    reference: &NationalReference,
) -> ReferenceComparison {
    let aging_ratio_diff = metrics.aging_ratio - reference.aging_ratio;
    let aging_velocity_diff = trend.aging_velocity - reference.aging_velocity;
    let old_old_ratio_diff = metrics.old_old_ratio - reference.old_old_ratio;
    let total_deviation =
        aging_ratio_diff.abs() + aging_velocity_diff.abs() + old_old_ratio_diff.abs();

    ReferenceComparison {
        aging_ratio_diff,
        aging_velocity_diff,
        old_old_ratio_diff,
        total_deviation,
        severity: DeviationSeverity::classify(total_deviation),
    }
}
