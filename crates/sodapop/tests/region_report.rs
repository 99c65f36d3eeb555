use chrono::NaiveDate;
use sodapop::demographics::report::views::{Anomaly, ServiceCategory};
use sodapop::demographics::thresholds::{AgingStage, SeverityTier};
use sodapop::demographics::urgency::UrgencyFactor;
use sodapop::demographics::{
    analyze_region, synthesize_report, CsvRegionLoader, NationalReference, RegionCode,
    RegionDataSource,
};

fn generated_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date")
}

fn fixture() -> sodapop::demographics::InMemoryRegionSource {
    let path = format!("{}/tests/fixtures/regions.csv", env!("CARGO_MANIFEST_DIR"));
    CsvRegionLoader::from_path(path).expect("fixture loads")
}

#[test]
fn report_tiers_agree_with_urgency_components() {
    let source = fixture();
    let code = RegionCode::parse("4772000000").expect("valid code");
    let region = source.region(&code).expect("군위군 present");
    let analysis = analyze_region(region, 2025).expect("2025 analysed");
    let report = synthesize_report(region, &analysis, &NationalReference::default(), generated_on());

    let old_old_points = analysis
        .urgency
        .components
        .iter()
        .find(|component| component.factor == UrgencyFactor::OldOldRatio)
        .map(|component| component.points)
        .expect("old-old component");
    assert_eq!(SeverityTier::old_old(analysis.metrics.old_old_ratio), SeverityTier::High);
    assert_eq!(old_old_points, 25.0);
    assert!(report
        .key_findings
        .iter()
        .any(|finding| finding.starts_with("후기고령 인구 비중 50% 초과")));

    assert_eq!(report.aging_stage, AgingStage::SuperAged);
    assert_eq!(report.urgency_score, analysis.urgency.total);
    assert_eq!(report.primary_service, ServiceCategory::DementiaCare);
    assert!(report
        .recommendations
        .iter()
        .any(|rec| rec.category == ServiceCategory::HomeCare));
    assert!(report.anomalies.contains(&Anomaly::SuperAged));
}

#[test]
fn moderate_region_has_no_super_aged_wording() {
    let source = fixture();
    let code = RegionCode::parse("4425000000").expect("valid code");
    let region = source.region(&code).expect("계룡시 present");
    let analysis = analyze_region(region, 2025).expect("2025 analysed");
    let report = synthesize_report(region, &analysis, &NationalReference::default(), generated_on());

    assert_eq!(report.aging_stage, AgingStage::Aged);
    assert!(report.summary.contains("고령사회 단계에 있는"));
    assert!(!report.anomalies.contains(&Anomaly::SuperAged));
    assert_eq!(report.title, "충남 계룡시 인구구조 분석 요약");
    assert_eq!(report.generated_on, generated_on());
}

#[test]
fn report_is_none_for_missing_year() {
    let source = fixture();
    let code = RegionCode::parse("2611000000").expect("valid code");
    let region = source.region(&code).expect("부산 중구 present");
    assert!(analyze_region(region, 2025).is_none());
    assert!(analyze_region(region, 2021).is_some());
}

#[test]
fn report_serializes_with_snake_case_enums() {
    let source = fixture();
    let code = RegionCode::parse("1168000000").expect("valid code");
    let region = source.region(&code).expect("강남구 present");
    let analysis = analyze_region(region, 2025).expect("2025 analysed");
    let report = synthesize_report(region, &analysis, &NationalReference::default(), generated_on());

    let json = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(json["region_code"], "1168000000");
    assert_eq!(json["aging_stage"], "super_aged");
    assert_eq!(json["urgency_level"], "critical");
    assert_eq!(json["generated_on"], "2025-10-01");
}
