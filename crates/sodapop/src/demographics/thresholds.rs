//! Severity breakpoints shared by the urgency scorer and the report synthesizer.
//!
//! Every comparison is strict (`value > breakpoint`), so a region sitting
//! exactly on a breakpoint stays in the lower tier for both consumers.

use serde::Serialize;

/// Aging ratio (65+ share, %) above which a region is an aged society (고령사회).
pub const AGED_SOCIETY_RATIO: f64 = 14.0;
/// Aging ratio (%) above which a region is a super-aged society (초고령사회).
pub const SUPER_AGED_RATIO: f64 = 20.0;

/// Old-old ratio (75+ share of elderly, %) breakpoints.
pub const OLD_OLD_ELEVATED_RATIO: f64 = 40.0;
pub const OLD_OLD_HIGH_RATIO: f64 = 50.0;

/// Aging velocity (elderly CAGR, %/yr) breakpoints.
pub const VELOCITY_ELEVATED: f64 = 3.0;
pub const VELOCITY_HIGH: f64 = 5.0;

/// Dependency ratio (%) breakpoints.
pub const DEPENDENCY_ELEVATED_RATIO: f64 = 45.0;
pub const DEPENDENCY_HIGH_RATIO: f64 = 60.0;

/// Summed absolute deviation (percentage points) from the national baseline.
pub const DEVIATION_ELEVATED: f64 = 8.0;
pub const DEVIATION_SEVERE: f64 = 15.0;

/// Society classification by aging ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgingStage {
    Aging,
    Aged,
    SuperAged,
}

impl AgingStage {
    pub fn classify(aging_ratio: f64) -> Self {
        if aging_ratio > SUPER_AGED_RATIO {
            Self::SuperAged
        } else if aging_ratio > AGED_SOCIETY_RATIO {
            Self::Aged
        } else {
            Self::Aging
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Aging => "고령화사회",
            Self::Aged => "고령사회",
            Self::SuperAged => "초고령사회",
        }
    }
}

/// Common three-step tier used for the old-old, velocity and dependency scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    Baseline,
    Elevated,
    High,
}

impl SeverityTier {
    fn classify(value: f64, elevated: f64, high: f64) -> Self {
        if value > high {
            Self::High
        } else if value > elevated {
            Self::Elevated
        } else {
            Self::Baseline
        }
    }

    pub fn old_old(ratio: f64) -> Self {
        Self::classify(ratio, OLD_OLD_ELEVATED_RATIO, OLD_OLD_HIGH_RATIO)
    }

    pub fn velocity(velocity: f64) -> Self {
        Self::classify(velocity, VELOCITY_ELEVATED, VELOCITY_HIGH)
    }

    pub fn dependency(ratio: f64) -> Self {
        Self::classify(ratio, DEPENDENCY_ELEVATED_RATIO, DEPENDENCY_HIGH_RATIO)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Baseline => "보통",
            Self::Elevated => "주의",
            Self::High => "심각",
        }
    }
}
