use super::metrics::Metrics;
use super::thresholds::{
    AGED_SOCIETY_RATIO, DEPENDENCY_ELEVATED_RATIO, DEPENDENCY_HIGH_RATIO, OLD_OLD_ELEVATED_RATIO,
    OLD_OLD_HIGH_RATIO, SUPER_AGED_RATIO, VELOCITY_ELEVATED, VELOCITY_HIGH,
};
use super::trend::Trend;
use serde::Serialize;

/// Points awarded when a measure clears its high breakpoint.
const HIGH_POINTS: f64 = 25.0;
/// Points awarded when a measure clears its elevated breakpoint.
const ELEVATED_POINTS: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyFactor {
    AgingRatio,
    OldOldRatio,
    AgingVelocity,
    DependencyRatio,
}

impl UrgencyFactor {
    pub const fn label(self) -> &'static str {
        match self {
            Self::AgingRatio => "고령화율",
            Self::OldOldRatio => "후기고령 비율",
            Self::AgingVelocity => "고령화 속도",
            Self::DependencyRatio => "부양비",
        }
    }
}

/// One capped contribution to the urgency score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrgencyComponent {
    pub factor: UrgencyFactor,
    pub value: f64,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrgencyBreakdown {
    pub components: Vec<UrgencyComponent>,
    pub total: f64,
    pub level: UrgencyLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    Low,
    Moderate,
    Elevated,
    High,
    Critical,
}

impl UrgencyLevel {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Critical,
            Self::High,
            Self::Elevated,
            Self::Moderate,
            Self::Low,
        ]
    }

    pub fn classify(score: f64) -> Self {
        if score >= 80.0 {
            Self::Critical
        } else if score >= 60.0 {
            Self::High
        } else if score >= 40.0 {
            Self::Elevated
        } else if score >= 20.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Elevated => "Elevated",
            Self::Moderate => "Moderate",
            Self::Low => "Low",
        }
    }

    pub const fn guidance(self) -> &'static str {
        match self {
            Self::Critical => "즉각적인 정책 개입이 필요한 위험 수준입니다",
            Self::High => "우선적인 관심과 자원 배분이 요구됩니다",
            Self::Elevated => "지속적인 모니터링과 선제적 대응이 필요합니다",
            Self::Moderate => "현행 서비스 수준의 유지와 점진적 확대가 적절합니다",
            Self::Low => "현재 안정적인 상태로 예방적 관리가 권장됩니다",
        }
    }
}

/// Welfare-urgency score in `[0, 100]`.
pub fn compute_urgency(metrics: &Metrics, trend: &Trend) -> f64 {
    urgency_breakdown(metrics, trend).total
}

/// Scores the four components, each capped to `[0, 25]`, and clamps the sum.
pub fn urgency_breakdown(metrics: &Metrics, trend: &Trend) -> UrgencyBreakdown {
    let components = vec![
        component(
            UrgencyFactor::AgingRatio,
            metrics.aging_ratio,
            SUPER_AGED_RATIO,
            AGED_SOCIETY_RATIO,
            0.5,
        ),
        component(
            UrgencyFactor::OldOldRatio,
            metrics.old_old_ratio,
            OLD_OLD_HIGH_RATIO,
            OLD_OLD_ELEVATED_RATIO,
            0.3,
        ),
        component(
            UrgencyFactor::AgingVelocity,
            trend.aging_velocity,
            VELOCITY_HIGH,
            VELOCITY_ELEVATED,
            3.0,
        ),
        component(
            UrgencyFactor::DependencyRatio,
            metrics.dependency_ratio,
            DEPENDENCY_HIGH_RATIO,
            DEPENDENCY_ELEVATED_RATIO,
            0.3,
        ),
    ];

    let total = components
        .iter()
        .map(|component| component.points)
        .sum::<f64>()
        .clamp(0.0, 100.0);

    UrgencyBreakdown {
        components,
        total,
        level: UrgencyLevel::classify(total),
    }
}

fn component(factor: UrgencyFactor, value: f64, high: f64, elevated: f64, slope: f64) -> UrgencyComponent {
    let points = if value > high {
        HIGH_POINTS
    } else if value > elevated {
        ELEVATED_POINTS
    } else {
        value * slope
    };

    UrgencyComponent {
        factor,
        value,
        points: if points.is_finite() {
            points.clamp(0.0, HIGH_POINTS)
        } else {
            0.0
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(aging: f64, old_old: f64, dependency: f64) -> Metrics {
        Metrics {
            aging_ratio: aging,
            old_old_ratio: old_old,
            dependency_ratio: dependency,
            ..Metrics::default()
        }
    }

    fn trend(velocity: f64) -> Trend {
        Trend {
            aging_velocity: velocity,
            ..Trend::default()
        }
    }

    #[test]
    fn gangnam_scenario_scores_high() {
        let breakdown = urgency_breakdown(&metrics(30.0, 42.0, 72.41), &trend(2.0));
        let points: Vec<f64> = breakdown.components.iter().map(|c| c.points).collect();
        assert_eq!(points, vec![25.0, 15.0, 6.0, 25.0]);
        assert_eq!(breakdown.total, 71.0);
        assert_eq!(breakdown.level, UrgencyLevel::High);
    }

    #[test]
    fn linear_segments_apply_below_elevated_breakpoints() {
        let score = compute_urgency(&metrics(10.0, 30.0, 40.0), &trend(1.0));
        assert!((score - (5.0 + 9.0 + 3.0 + 12.0)).abs() < 1e-9);
    }

    #[test]
    fn breakpoints_are_exclusive() {
        let at_edges = compute_urgency(&metrics(20.0, 50.0, 60.0), &trend(5.0));
        assert_eq!(at_edges, 60.0);
        let above = compute_urgency(&metrics(20.1, 50.1, 60.1), &trend(5.1));
        assert_eq!(above, 100.0);
    }

    #[test]
    fn shrinking_elderly_population_never_subtracts_points() {
        let declining = compute_urgency(&metrics(30.0, 42.0, 72.0), &trend(-4.0));
        assert_eq!(declining, 65.0);
    }

    #[test]
    fn aging_ratio_is_monotonic_between_ten_and_twenty_five() {
        let mut previous = f64::MIN;
        for step in 0..=150 {
            let aging = 10.0 + f64::from(step) * 0.1;
            let score = compute_urgency(&metrics(aging, 35.0, 50.0), &trend(2.5));
            assert!(score >= previous, "score dropped at aging ratio {aging}");
            previous = score;
        }
    }

    #[test]
    fn score_is_bounded_for_extreme_inputs() {
        for (aging, old_old, dependency, velocity) in [
            (0.0, 0.0, 0.0, 0.0),
            (100.0, 100.0, 1_000.0, 80.0),
            (5.0, 5.0, 5.0, -50.0),
            (14.0, 40.0, 45.0, 3.0),
            (f64::NAN, 40.0, f64::INFINITY, 3.0),
        ] {
            let score = compute_urgency(&metrics(aging, old_old, dependency), &trend(velocity));
            assert!((0.0..=100.0).contains(&score), "score {score} out of range");
        }
    }

    #[test]
    fn levels_cover_score_bands() {
        assert_eq!(UrgencyLevel::classify(85.0), UrgencyLevel::Critical);
        assert_eq!(UrgencyLevel::classify(60.0), UrgencyLevel::High);
        assert_eq!(UrgencyLevel::classify(45.0), UrgencyLevel::Elevated);
        assert_eq!(UrgencyLevel::classify(20.0), UrgencyLevel::Moderate);
        assert_eq!(UrgencyLevel::classify(19.9), UrgencyLevel::Low);
    }
}
