use sodapop::demographics::urgency::UrgencyLevel;
use sodapop::demographics::{
    compute_metrics, compute_region_trend, compute_urgency, rank_regions, rank_regions_by,
    summarize_regions, summarize_regions_by, CsvRegionLoader, RankBy, InMemoryRegionSource, Region, RegionCode, RegionDataSource, SettlementType,
    SyntheticRegionGenerator, YearRecord,
};

fn fixture_path() -> String {
    format!("{}/tests/fixtures/regions.csv", env!("CARGO_MANIFEST_DIR"))
}

fn code(raw: &str) -> RegionCode {
    RegionCode::parse(raw).expect("valid region code")
}

fn record(total: u64, children: u64, youth: u64, middle: u64, elderly: u64, old_old: u64) -> YearRecord {
    YearRecord {
        total_population: total,
        total_households: total / 2,
        children,
        youth,
        middle,
        elderly,
        young_old: elderly - old_old,
        old_old,
        ..YearRecord::default()
    }
}

#[test]
fn gangnam_scenario_lands_in_high_urgency() {
    let region = Region::new(code("1168000000"), "서울 강남구", SettlementType::Urban)
        .with_year(2023, record(510_000, 63_000, 90_000, 216_000, 141_000, 57_000))
        .with_year(2025, record(500_000, 60_000, 85_000, 205_000, 150_000, 63_000));

    let metrics = compute_metrics(region.record(2025).expect("2025 present"));
    assert!((metrics.aging_ratio - 30.0).abs() < 1e-9);
    assert!((metrics.old_old_ratio - 42.0).abs() < 1e-9);
    assert!((metrics.dependency_ratio - 72.4138).abs() < 1e-3);

    let trend = compute_region_trend(&region);
    let score = compute_urgency(&metrics, &trend);
    assert!(score >= 65.0, "score {score} below the fixed-component floor");
    assert!(score <= 100.0);
}

#[test]
fn csv_export_ranks_municipalities_only() {
    let source = CsvRegionLoader::from_path(fixture_path()).expect("fixture loads");
    assert_eq!(source.len(), 5, "total rows are skipped on import");
    assert!(source.region(&code("4425000000")).is_some(), "계룡시 is not a total row");

    let ranked = rank_regions(&source, 2025, 10);
    let codes: Vec<&str> = ranked.iter().map(|entry| entry.code.as_str()).collect();
    assert_eq!(codes, vec!["4772000000", "1168000000", "4425000000"]);

    let ranks: Vec<usize> = ranked.iter().map(|entry| entry.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
    assert!(ranked
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score));

    assert_eq!(ranked[0].level, UrgencyLevel::Critical);
    assert_eq!(ranked[1].score, 80.0);
    assert_eq!(ranked[2].level, UrgencyLevel::Elevated);
}

#[test]
fn regions_missing_the_year_are_omitted() {
    let source = CsvRegionLoader::from_path(fixture_path()).expect("fixture loads");

    let ranked = rank_regions(&source, 2021, 10);
    assert!(ranked
        .iter()
        .any(|entry| entry.code.as_str() == "2611000000"));

    let ranked = rank_regions(&source, 2025, 10);
    assert!(ranked
        .iter()
        .all(|entry| entry.code.as_str() != "2611000000"));
    assert!(ranked.iter().all(|entry| !entry.code.is_aggregate()));

    assert!(rank_regions(&source, 1999, 10).is_empty());
}

#[test]
fn limit_truncates_but_summary_covers_every_region() {
    let source = CsvRegionLoader::from_path(fixture_path()).expect("fixture loads");

    let (ranked, summary) = summarize_regions(&source, 2025, 1);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].rank, 1);
    assert_eq!(summary.regions, 3);
    assert_eq!(summary.max_score, ranked[0].score);
    assert_eq!(summary.median_score, 80.0);

    let counted: usize = summary
        .level_distribution
        .iter()
        .map(|entry| entry.regions)
        .sum();
    assert_eq!(counted, 3);

    assert!(rank_regions(&source, 2025, 0).is_empty());
}

#[test]
fn equal_scores_keep_source_order() {
    let twin = record(100_000, 12_000, 20_000, 50_000, 18_000, 7_000);
    let source: InMemoryRegionSource = ["1111000000", "1114000000", "1117000000"]
        .into_iter()
        .map(|raw| Region::new(code(raw), raw, SettlementType::Urban).with_year(2025, twin))
        .collect();

    let ranked = rank_regions(&source, 2025, 10);
    let codes: Vec<&str> = ranked.iter().map(|entry| entry.code.as_str()).collect();
    assert_eq!(codes, vec!["1111000000", "1114000000", "1117000000"]);
    assert!(ranked.iter().all(|entry| entry.score == ranked[0].score));
}

#[test]
fn single_year_regions_rank_on_metrics_alone() {
    let source: InMemoryRegionSource = std::iter::once(
        Region::new(code("4772000000"), "경북 군위군", SettlementType::Rural)
            .with_year(2025, record(23_000, 1_500, 1_800, 9_700, 10_000, 5_500)),
    )
    .collect();

    let region = source.region(&code("4772000000")).expect("region present");
    let trend = compute_region_trend(region);
    assert_eq!(trend.aging_velocity, 0.0);
    assert_eq!(trend.span_years(), 0);

    let ranked = rank_regions(&source, 2025, 10);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].score, 75.0);
}

#[test]
fn synthetic_rankings_are_reproducible() {
    let first = SyntheticRegionGenerator::new(42).generate();
    let second = SyntheticRegionGenerator::new(42).generate();

    let left = rank_regions(&first, 2025, 27);
    let right = rank_regions(&second, 2025, 27);
    assert_eq!(left, right);
    // Five of the default regions are province-level totals.
    assert_eq!(left.len(), 22);
    assert!(left
        .iter()
        .all(|entry| (0.0..=100.0).contains(&entry.score)));

    let other = rank_regions(&SyntheticRegionGenerator::new(7).generate(), 2025, 27);
    assert_ne!(left, other);
}

#[test]
fn velocity_rankings_reorder_the_same_regions() {
    let source = CsvRegionLoader::from_path(fixture_path()).expect("fixture loads");

    let by_aging = rank_regions_by(&source, 2025, 10, RankBy::AgingVelocity);
    let codes: Vec<&str> = by_aging.iter().map(|entry| entry.code.as_str()).collect();
    assert_eq!(codes, vec!["4425000000", "1168000000", "4772000000"]);
    assert!(by_aging
        .windows(2)
        .all(|pair| pair[0].aging_velocity >= pair[1].aging_velocity));

    let by_old_old = rank_regions_by(&source, 2025, 2, RankBy::OldOldVelocity);
    let codes: Vec<&str> = by_old_old.iter().map(|entry| entry.code.as_str()).collect();
    assert_eq!(codes, vec!["1168000000", "4425000000"]);
    assert_eq!(by_old_old[1].rank, 2);

    assert_eq!(
        rank_regions_by(&source, 2025, 10, RankBy::Urgency),
        rank_regions(&source, 2025, 10)
    );
}

#[test]
fn summary_reports_velocity_spread_and_top_decile() {
    let source = CsvRegionLoader::from_path(fixture_path()).expect("fixture loads");
    let (_, summary) = summarize_regions_by(&source, 2025, 10, RankBy::AgingVelocity);

    let gunwi = (10_000.0f64 / 9_200.0).powf(0.25) * 100.0 - 100.0;
    let gyeryong = (7_000.0f64 / 6_000.0).powf(0.25) * 100.0 - 100.0;
    assert!((summary.velocity.min - gunwi).abs() < 1e-9);
    assert!((summary.velocity.max - gyeryong).abs() < 1e-9);
    assert!(summary.velocity.std_dev > 0.0);
    assert!(summary.velocity.min <= summary.velocity.median);
    assert!(summary.velocity.median <= summary.velocity.max);

    assert!(summary.top_decile_threshold > 80.0);
    assert!(summary.top_decile_threshold <= summary.max_score);
}

#[test]
fn extreme_counts_rank_without_panicking() {
    let huge = YearRecord {
        total_population: u64::MAX,
        children: u64::MAX,
        youth: 10,
        middle: 10,
        elderly: u64::MAX,
        young_old: u64::MAX,
        old_old: u64::MAX,
        ..YearRecord::default()
    };
    let source: InMemoryRegionSource = std::iter::once(
        Region::new(code("4772000000"), "경북 군위군", SettlementType::Rural)
            .with_year(2021, YearRecord::default())
            .with_year(2025, huge),
    )
    .collect();

    let (ranked, summary) = summarize_regions(&source, 2025, 10);
    assert_eq!(ranked.len(), 1);
    assert!((0.0..=100.0).contains(&ranked[0].score));
    assert_eq!(summary.regions, 1);
}
