use super::super::domain::RegionCode;
use super::super::reference::ReferenceComparison;
use super::super::thresholds::AgingStage;
use super::super::urgency::UrgencyLevel;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    HomeCare,
    DementiaCare,
    SocialParticipation,
    Transportation,
    CaregiverSupport,
    YouthWelfare,
    EmergencyResponse,
    HealthManagement,
}

impl ServiceCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::HomeCare => "재가돌봄서비스",
            Self::DementiaCare => "치매전문돌봄",
            Self::SocialParticipation => "사회참여프로그램",
            Self::Transportation => "이동지원서비스",
            Self::CaregiverSupport => "가족돌봄자지원",
            Self::YouthWelfare => "아동청소년복지",
            Self::EmergencyResponse => "응급안전서비스",
            Self::HealthManagement => "건강관리서비스",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceRecommendation {
    pub category: ServiceCategory,
    pub category_label: &'static str,
    pub rationale: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonPosition {
    Above,
    Below,
    Similar,
}

/// One metric set against the national baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NationalComparison {
    pub metric: &'static str,
    pub value: f64,
    pub national: f64,
    /// `value - national`, in percentage points.
    pub difference: f64,
    pub position: ComparisonPosition,
    pub phrase: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Anomaly {
    AccelerationSpike,
    RapidAging,
    PopulationCliff,
    YouthCollapse,
    SuperAged,
}

impl Anomaly {
    pub const fn description(self) -> &'static str {
        match self {
            Self::AccelerationSpike => "후기고령 증가 가속화 감지",
            Self::RapidAging => "초고속 고령화 진행 중",
            Self::PopulationCliff => "급격한 인구 감소",
            Self::YouthCollapse => "아동·청소년 인구 급감",
            Self::SuperAged => "초고령사회 진입 (고령화율 20% 초과)",
        }
    }
}

/// Narrative report for one region and year, ready for a presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionReport {
    pub region_code: RegionCode,
    pub region_name: String,
    pub year: i32,
    pub generated_on: NaiveDate,
    pub title: String,
    pub aging_stage: AgingStage,
    pub aging_stage_label: &'static str,
    pub urgency_score: f64,
    pub urgency_level: UrgencyLevel,
    pub summary: String,
    pub key_findings: Vec<String>,
    pub comparisons: Vec<NationalComparison>,
    pub deviation: ReferenceComparison,
    pub recommendations: Vec<ServiceRecommendation>,
    pub primary_service: ServiceCategory,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anomalies: Vec<Anomaly>,
    pub proposal_snippet: String,
    pub citations: Vec<String>,
}
