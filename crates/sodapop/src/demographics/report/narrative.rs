use super::super::analysis::RegionAnalysis;
use super::super::domain::Region;
use super::super::metrics::Metrics;
use super::super::reference::{compare_to_reference, NationalReference};
use super::super::thresholds::{AgingStage, SeverityTier, SUPER_AGED_RATIO, VELOCITY_HIGH};
use super::super::trend::Trend;
use super::recommendations::{primary_service, recommend_services};
use super::views::{Anomaly, ComparisonPosition, NationalComparison, RegionReport};
use chrono::NaiveDate;

/// Within this many percentage points a region reads as "similar" to the nation.
const SIMILAR_BAND: f64 = 0.5;
const YOUTH_DECLINE_FINDING: f64 = -3.0;

/// Fills the narrative templates for one region-year from precomputed engine
/// output. Tier wording comes from the shared threshold table.
pub fn synthesize_report(
    region: &Region,
    analysis: &RegionAnalysis,
    reference: &NationalReference,
    generated_on: NaiveDate,
) -> RegionReport {
    let metrics = &analysis.metrics;
    let trend = &analysis.trend;
    let level = analysis.urgency.level;
    let aging_stage = AgingStage::classify(metrics.aging_ratio);
    let primary = primary_service(metrics, trend);

    RegionReport {
        region_code: region.code.clone(),
        region_name: region.name.clone(),
        year: analysis.year,
        generated_on,
        title: format!("{} 인구구조 분석 요약", region.name),
        aging_stage,
        aging_stage_label: aging_stage.label(),
        urgency_score: analysis.urgency.total,
        urgency_level: level,
        summary: summary_paragraph(&region.name, metrics, trend, reference, analysis),
        key_findings: key_findings(metrics, trend, reference),
        comparisons: national_comparisons(metrics, trend, reference),
        deviation: compare_to_reference(metrics, trend, reference),
        recommendations: recommend_services(&analysis.record, metrics, trend, level),
        primary_service: primary,
        anomalies: detect_anomalies(metrics, trend),
        proposal_snippet: proposal_snippet(&region.name, metrics, trend, reference, primary),
        citations: citations(analysis.year),
    }
}

fn summary_paragraph(
    name: &str,
    metrics: &Metrics,
    trend: &Trend,
    reference: &NationalReference,
    analysis: &RegionAnalysis,
) -> String {
    let status = match AgingStage::classify(metrics.aging_ratio) {
        AgingStage::SuperAged => "초고령사회에 진입한",
        AgingStage::Aged => "고령사회 단계에 있는",
        AgingStage::Aging => "고령화가 진행 중인",
    };

    let mut summary = format!(
        "{name}은(는) {status} 지역으로, 현재 65세 이상 고령인구가 전체 인구의 {:.1}%를 차지하고 있습니다. ",
        metrics.aging_ratio
    );

    if trend.span_years() > 0 {
        let pace = if trend.aging_velocity > VELOCITY_HIGH {
            "급속한 고령화가 진행되고 있으며"
        } else if trend.aging_velocity > reference.aging_velocity {
            "전국 평균을 상회하는 고령화가 진행 중이며"
        } else {
            "비교적 완만한 고령화 추이를 보이고 있으며"
        };
        let movement = if trend.old_old_velocity >= 0.0 {
            "증가"
        } else {
            "감소"
        };
        summary.push_str(&format!(
            "최근 {}년간 {pace}, 특히 75세 이상 후기고령인구는 연평균 {:.1}%씩 {movement}하고 있습니다. ",
            trend.span_years(),
            trend.old_old_velocity.abs()
        ));
    } else {
        summary.push_str("단일 연도 자료만 있어 추세는 산출되지 않았습니다. ");
    }

    summary.push_str(analysis.urgency.level.guidance());
    summary.push('.');
    summary
}

fn key_findings(metrics: &Metrics, trend: &Trend, reference: &NationalReference) -> Vec<String> {
    let mut findings = Vec::new();

    match AgingStage::classify(metrics.aging_ratio) {
        AgingStage::SuperAged => findings.push(format!(
            "초고령사회 진입 (고령화율 {:.1}%)",
            metrics.aging_ratio
        )),
        AgingStage::Aged => findings.push(format!(
            "고령사회 단계 (고령화율 {:.1}%)",
            metrics.aging_ratio
        )),
        AgingStage::Aging => {}
    }

    match SeverityTier::old_old(metrics.old_old_ratio) {
        SeverityTier::High => findings.push(format!(
            "후기고령 인구 비중 50% 초과 ({:.1}%)",
            metrics.old_old_ratio
        )),
        SeverityTier::Elevated => findings.push(format!(
            "후기고령 인구 비중 40% 초과 ({:.1}%)",
            metrics.old_old_ratio
        )),
        SeverityTier::Baseline => {}
    }

    if trend.aging_velocity > reference.aging_velocity {
        findings.push(format!(
            "전국 평균 대비 {:.1}%p 빠른 고령화 진행",
            trend.aging_velocity - reference.aging_velocity
        ));
    }

    if trend.youth_velocity < YOUTH_DECLINE_FINDING {
        findings.push(format!(
            "아동·청소년 인구 급감 ({:.1}%/년)",
            trend.youth_velocity
        ));
    }

    match SeverityTier::dependency(metrics.dependency_ratio) {
        SeverityTier::High => findings.push(format!(
            "높은 부양부담 (부양비 {:.1}%)",
            metrics.dependency_ratio
        )),
        SeverityTier::Elevated => findings.push(format!(
            "부양부담 증가 (부양비 {:.1}%)",
            metrics.dependency_ratio
        )),
        SeverityTier::Baseline => {}
    }

    if findings.is_empty() {
        findings.push("특이사항 없음".to_string());
    }
    findings
}

/// "N points above/below nation" phrasing for the four headline measures.
pub fn national_comparisons(
    metrics: &Metrics,
    trend: &Trend,
    reference: &NationalReference,
) -> Vec<NationalComparison> {
    [
        ("고령화율", metrics.aging_ratio, reference.aging_ratio),
        ("후기고령 비율", metrics.old_old_ratio, reference.old_old_ratio),
        ("부양비", metrics.dependency_ratio, reference.dependency_ratio),
        ("고령화 속도", trend.aging_velocity, reference.aging_velocity),
    ]
    .into_iter()
    .map(|(metric, value, national)| compare(metric, value, national))
    .collect()
}

fn compare(metric: &'static str, value: f64, national: f64) -> NationalComparison {
    let difference = value - national;
    let (position, phrase) = if difference > SIMILAR_BAND {
        (
            ComparisonPosition::Above,
            format!("전국 평균({national:.1}%)을 {difference:.1}%p 상회"),
        )
    } else if difference < -SIMILAR_BAND {
        (
            ComparisonPosition::Below,
            format!("전국 평균({national:.1}%)보다 {:.1}%p 하회", difference.abs()),
        )
    } else {
        (
            ComparisonPosition::Similar,
            format!("전국 평균({national:.1}%)과 유사한 수준"),
        )
    };

    NationalComparison {
        metric,
        value,
        national,
        difference,
        position,
        phrase,
    }
}

pub fn detect_anomalies(metrics: &Metrics, trend: &Trend) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();
    if trend.old_old_acceleration > 5.0 {
        anomalies.push(Anomaly::AccelerationSpike);
    }
    if trend.aging_velocity > 8.0 {
        anomalies.push(Anomaly::RapidAging);
    }
    if trend.population_change < -5.0 {
        anomalies.push(Anomaly::PopulationCliff);
    }
    if trend.youth_velocity < -5.0 {
        anomalies.push(Anomaly::YouthCollapse);
    }
    if metrics.aging_ratio > SUPER_AGED_RATIO {
        anomalies.push(Anomaly::SuperAged);
    }
    anomalies
}

fn proposal_snippet(
    name: &str,
    metrics: &Metrics,
    trend: &Trend,
    reference: &NationalReference,
    primary: super::views::ServiceCategory,
) -> String {
    let growth = if trend.old_old_velocity > 10.0 {
        "급격히 증가"
    } else if trend.old_old_velocity > 5.0 {
        "빠르게 증가"
    } else if trend.old_old_velocity > 0.0 {
        "꾸준히 증가"
    } else {
        "감소"
    };

    let comparison = compare("후기고령 인구 비중", metrics.old_old_share, reference.old_old_share);
    let comparison_sentence = match comparison.position {
        ComparisonPosition::Above => format!(
            "이는 전국 평균({:.1}%)을 {:.1}%p 상회하는 수치입니다.",
            comparison.national, comparison.difference
        ),
        ComparisonPosition::Below => format!(
            "이는 전국 평균({:.1}%)보다 {:.1}%p 낮은 수준입니다.",
            comparison.national,
            comparison.difference.abs()
        ),
        ComparisonPosition::Similar => format!(
            "이는 전국 평균({:.1}%)과 유사한 수준입니다.",
            comparison.national
        ),
    };

    format!(
        "{name}의 75세 이상 후기고령인구는 {}년 대비 연평균 {:.1}% {growth}하여 현재 전체 인구의 {:.1}%를 차지하고 있습니다. {comparison_sentence} 이에 따라 {}의 확충이 필요합니다.",
        trend.start_year,
        trend.old_old_velocity.abs(),
        metrics.old_old_share,
        primary.label()
    )
}

fn citations(year: i32) -> Vec<String> {
    vec![
        format!("통계청, 「주민등록인구현황」, {year}년"),
        format!("통계청, 「장래인구추계」, {year}년"),
        "행정안전부, 「행정구역코드」".to_string(),
        format!("국가통계포털(KOSIS), 인구총조사, {year}년"),
    ]
}
