use crate::infra::{
    load_csv, load_region_source, parse_date, parse_limit, parse_rank_by, parse_region_code,
};
use chrono::{Local, NaiveDate};
use clap::Args;
use sodapop::config::{AnalysisConfig, AppConfig};
use sodapop::demographics::ranking::RankingSummary;
use sodapop::demographics::{
    analyze_region, summarize_regions, summarize_regions_by, synthesize_report, trend_alert,
    InMemoryRegionSource, NationalReference, RankBy, RankedRegion, RegionCode, RegionDataSource,
    RegionReport, SyntheticRegionGenerator, TrendAlert,
};
use sodapop::error::AppError;
use sodapop::telemetry::{self, LogSink};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct RankArgs {
    /// Reporting year (defaults to SODAPOP_REPORT_YEAR)
    #[arg(long)]
    pub(crate) year: Option<i32>,
    /// Number of regions to print (defaults to SODAPOP_RANKING_LIMIT)
    #[arg(long, value_parser = parse_limit)]
    pub(crate) limit: Option<usize>,
    /// Measure to order by: urgency, aging_velocity or old_old_velocity
    #[arg(long, value_parser = parse_rank_by)]
    pub(crate) by: Option<RankBy>,
    /// CSV export to rank instead of the configured data source
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Region H-Code; shorter codes are padded to 10 digits
    #[arg(long, value_parser = parse_region_code)]
    pub(crate) code: RegionCode,
    /// Reporting year (defaults to SODAPOP_REPORT_YEAR)
    #[arg(long)]
    pub(crate) year: Option<i32>,
    /// CSV export to read instead of the configured data source
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Report date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Seed for the synthetic generator (defaults to SODAPOP_SYNTHETIC_SEED)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Number of regions to print in the ranking
    #[arg(long, value_parser = parse_limit)]
    pub(crate) limit: Option<usize>,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        year,
        limit,
        by,
        csv,
    } = args;
    let analysis = init_cli()?;
    let source = cli_source(&analysis, csv)?;

    let year = year.unwrap_or(analysis.report_year);
    let limit = limit.unwrap_or(analysis.ranking_limit);
    let by = by.unwrap_or_default();
    let (ranked, summary) = summarize_regions_by(&source, year, limit, by);
    render_ranking(&ranked, &summary, by);
    Ok(())
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        code,
        year,
        csv,
        today,
    } = args;
    let analysis = init_cli()?;
    let source = cli_source(&analysis, csv)?;

    let year = year.unwrap_or(analysis.report_year);
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let (report, alert) = build_report(&source, &code, year, today)?;
    render_report(&report);
    println!("\n{}", alert.message);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let analysis = init_cli()?;
    let seed = args.seed.unwrap_or(analysis.synthetic_seed);
    let limit = args.limit.unwrap_or(analysis.ranking_limit);
    let year = analysis.report_year;
    let today = Local::now().date_naive();

    println!("Demographic urgency demo (synthetic data, seed {seed})");
    let source = SyntheticRegionGenerator::new(seed).generate();
    let (ranked, summary) = summarize_regions(&source, year, limit);
    render_ranking(&ranked, &summary, RankBy::Urgency);

    let Some(top) = ranked.first() else {
        println!("\nNo municipality has {year} data; nothing to report.");
        return Ok(());
    };

    println!();
    let (report, alert) = build_report(&source, &top.code, year, today)?;
    render_report(&report);
    println!("\n{}", alert.message);
    Ok(())
}

/// Loads configuration and routes logs to stderr so stdout carries only output.
pub(crate) fn init_cli() -> Result<AnalysisConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init_with_sink(&config.telemetry, LogSink::Stderr)?;
    Ok(config.analysis)
}

pub(crate) fn cli_source(
    analysis: &AnalysisConfig,
    csv: Option<PathBuf>,
) -> Result<InMemoryRegionSource, AppError> {
    match csv {
        Some(path) => load_csv(&path),
        None => load_region_source(analysis),
    }
}

fn build_report(
    source: &InMemoryRegionSource,
    code: &RegionCode,
    year: i32,
    today: NaiveDate,
) -> Result<(RegionReport, TrendAlert), AppError> {
    let region = source
        .region(code)
        .ok_or_else(|| AppError::NotFound(format!("region {code}")))?;
    let analysis = analyze_region(region, year)
        .ok_or_else(|| AppError::NotFound(format!("no {year} data for region {code}")))?;
    let report = synthesize_report(region, &analysis, &NationalReference::default(), today);
    Ok((report, trend_alert(region, &analysis)))
}

fn render_ranking(ranked: &[RankedRegion], summary: &RankingSummary, by: RankBy) {
    println!(
        "Ranking by {} for {} (top {} of {} regions)",
        by.label(),
        summary.year,
        ranked.len(),
        summary.regions
    );
    for entry in ranked {
        println!(
            "{:>3}. {} ({}) score {:.1} [{}] | aging {:.1}% | velocity {:.1}%/yr | 75+ velocity {:.1}%/yr | population {}",
            entry.rank,
            entry.name,
            entry.code,
            entry.score,
            entry.level.label(),
            entry.aging_ratio,
            entry.aging_velocity,
            entry.old_old_velocity,
            entry.population
        );
    }

    println!(
        "Scores: mean {:.1} | median {:.1} | max {:.1} | top 10% from {:.1}",
        summary.mean_score,
        summary.median_score,
        summary.max_score,
        summary.top_decile_threshold
    );
    let velocity = &summary.velocity;
    println!(
        "Aging velocity: mean {:.2} | median {:.2} | std {:.2} | min {:.2} | max {:.2}",
        velocity.mean, velocity.median, velocity.std_dev, velocity.min, velocity.max
    );
    let distribution: Vec<String> = summary
        .level_distribution
        .iter()
        .map(|entry| format!("{} {}", entry.level_label, entry.regions))
        .collect();
    println!("Levels: {}", distribution.join(" | "));
}

fn render_report(report: &RegionReport) {
    println!("{} ({}, {})", report.title, report.region_code, report.year);
    println!(
        "- Stage: {} | urgency {:.1} ({})",
        report.aging_stage_label,
        report.urgency_score,
        report.urgency_level.label()
    );
    println!("- Generated on {}", report.generated_on);
    println!("\n{}", report.summary);

    println!("\nKey findings:");
    for finding in &report.key_findings {
        println!("  - {finding}");
    }

    println!("National comparison:");
    for comparison in &report.comparisons {
        println!(
            "  - {} {:.1}: {}",
            comparison.metric, comparison.value, comparison.phrase
        );
    }

    println!(
        "  Deviation from national baseline: {:.1}%p ({})",
        report.deviation.total_deviation,
        report.deviation.severity.label()
    );

    println!("Recommended services (primary: {}):", report.primary_service.label());
    for recommendation in &report.recommendations {
        println!(
            "  - {}: {}",
            recommendation.category_label, recommendation.rationale
        );
    }

    if !report.anomalies.is_empty() {
        println!("Anomalies:");
        for anomaly in &report.anomalies {
            println!("  - {}", anomaly.description());
        }
    }

    println!("\nProposal snippet:\n{}", report.proposal_snippet);
    println!("\nSources:");
    for citation in &report.citations {
        println!("  - {citation}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_for_top_synthetic_region_builds() {
        let source = SyntheticRegionGenerator::new(42).generate();
        let (ranked, _) = summarize_regions(&source, 2025, 1);
        let top = ranked.first().expect("synthetic data ranks");
        let today = NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date");

        let (report, alert) = build_report(&source, &top.code, 2025, today).expect("report builds");
        assert_eq!(report.region_code, top.code);
        assert_eq!(report.urgency_score, top.score);
        assert_eq!(alert.region_code, top.code);
        assert_eq!(alert.anomalies, report.anomalies);
    }

    #[test]
    fn unknown_region_is_not_found() {
        let source = SyntheticRegionGenerator::new(42).generate();
        let code = RegionCode::parse("9999000000").expect("valid code");
        let today = NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date");

        let err = build_report(&source, &code, 2025, today).expect_err("region missing");
        assert!(matches!(err, AppError::NotFound(_)));
        let err = build_report(&source, &RegionCode::parse("1168000000").expect("valid"), 1990, today)
            .expect_err("year missing");
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
