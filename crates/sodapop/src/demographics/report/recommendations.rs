use super::super::domain::YearRecord;
use super::super::metrics::Metrics;
use super::super::thresholds::OLD_OLD_HIGH_RATIO;
use super::super::trend::Trend;
use super::super::urgency::UrgencyLevel;
use super::views::{ServiceCategory, ServiceRecommendation};

/// Service triggers. These are program-eligibility cut points, separate from
/// the severity tiers in `thresholds`.
const HOME_CARE_OLD_OLD_RATIO: f64 = 45.0;
const SOCIAL_PARTICIPATION_YOUNG_OLD_SHARE: f64 = 8.0;
const TRANSPORTATION_AGING_RATIO: f64 = 25.0;
const CAREGIVER_DEPENDENCY_RATIO: f64 = 50.0;
const CAREGIVER_PRIMARY_DEPENDENCY_RATIO: f64 = 55.0;
const YOUTH_DECLINE_VELOCITY: f64 = -3.0;

pub(crate) fn recommend_services(
    record: &YearRecord,
    metrics: &Metrics,
    trend: &Trend,
    level: UrgencyLevel,
) -> Vec<ServiceRecommendation> {
    let mut recommendations = Vec::new();
    let mut push = |category: ServiceCategory, rationale: String| {
        recommendations.push(ServiceRecommendation {
            category,
            category_label: category.label(),
            rationale,
        });
    };

    if metrics.old_old_ratio > HOME_CARE_OLD_OLD_RATIO {
        push(
            ServiceCategory::HomeCare,
            format!(
                "75세 이상 후기고령인구({}명) 대상 재가돌봄서비스 확충",
                record.old_old
            ),
        );
    }

    if metrics.old_old_ratio > OLD_OLD_HIGH_RATIO {
        push(
            ServiceCategory::DementiaCare,
            "치매안심센터 연계 치매전문돌봄 프로그램 강화".to_string(),
        );
    }

    if metrics.young_old_ratio > SOCIAL_PARTICIPATION_YOUNG_OLD_SHARE {
        push(
            ServiceCategory::SocialParticipation,
            format!(
                "전기고령인구({}명) 사회참여 활성화 프로그램 개발",
                record.young_old
            ),
        );
    }

    if metrics.aging_ratio > TRANSPORTATION_AGING_RATIO {
        push(
            ServiceCategory::Transportation,
            "고령친화 이동지원서비스 확대 (교통취약지역 중점)".to_string(),
        );
    }

    if metrics.dependency_ratio > CAREGIVER_DEPENDENCY_RATIO {
        push(
            ServiceCategory::CaregiverSupport,
            "가족돌봄자 휴식지원 및 상담서비스 강화".to_string(),
        );
    }

    if trend.youth_velocity < YOUTH_DECLINE_VELOCITY {
        push(
            ServiceCategory::YouthWelfare,
            "아동·청소년 유입을 위한 정주여건 개선 및 보육서비스 확충".to_string(),
        );
    }

    if level >= UrgencyLevel::High {
        push(
            ServiceCategory::EmergencyResponse,
            "독거노인 응급안전서비스 및 안부확인 체계 강화".to_string(),
        );
    }

    if recommendations.is_empty() {
        let category = ServiceCategory::HealthManagement;
        recommendations.push(ServiceRecommendation {
            category,
            category_label: category.label(),
            rationale: "현행 서비스 수준 유지 및 예방적 건강관리".to_string(),
        });
    }

    recommendations
}

pub(crate) fn primary_service(metrics: &Metrics, trend: &Trend) -> ServiceCategory {
    if metrics.old_old_ratio > OLD_OLD_HIGH_RATIO {
        ServiceCategory::DementiaCare
    } else if metrics.old_old_ratio > HOME_CARE_OLD_OLD_RATIO {
        ServiceCategory::HomeCare
    } else if metrics.dependency_ratio > CAREGIVER_PRIMARY_DEPENDENCY_RATIO {
        ServiceCategory::CaregiverSupport
    } else if metrics.aging_ratio > TRANSPORTATION_AGING_RATIO {
        ServiceCategory::Transportation
    } else if trend.youth_velocity < YOUTH_DECLINE_VELOCITY {
        ServiceCategory::YouthWelfare
    } else {
        ServiceCategory::HealthManagement
    }
}
