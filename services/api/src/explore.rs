use crate::demo::{cli_source, init_cli};
use crate::infra::{parse_admin_level, parse_region_code};
use clap::Args;
use sodapop::demographics::hierarchy::{navigation, search_by_name, Navigation};
use sodapop::demographics::{
    compare_regions, AdminLevel, Region, RegionCode, RegionComparison, RegionDataSource,
};
use sodapop::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// First region H-Code
    #[arg(long, value_parser = parse_region_code)]
    pub(crate) first: RegionCode,
    /// Second region H-Code
    #[arg(long, value_parser = parse_region_code)]
    pub(crate) second: RegionCode,
    /// Reporting year (defaults to SODAPOP_REPORT_YEAR)
    #[arg(long)]
    pub(crate) year: Option<i32>,
    /// CSV export to read instead of the configured data source
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct NavigateArgs {
    /// Region H-Code to centre the view on
    #[arg(long, value_parser = parse_region_code)]
    pub(crate) code: RegionCode,
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Part of a region name, matched case-insensitively
    pub(crate) query: String,
    /// Restrict matches to one level: province, municipality or neighborhood
    #[arg(long, value_parser = parse_admin_level)]
    pub(crate) level: Option<AdminLevel>,
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let analysis = init_cli()?;
    let source = cli_source(&analysis, args.csv)?;
    let year = args.year.unwrap_or(analysis.report_year);

    let comparison = build_comparison(&source, &args.first, &args.second, year)?;
    println!("{}", comparison.brief);
    Ok(())
}

pub(crate) fn run_navigate(args: NavigateArgs) -> Result<(), AppError> {
    let analysis = init_cli()?;
    let source = cli_source(&analysis, args.csv)?;

    let view = navigation(&source, &args.code)
        .ok_or_else(|| AppError::NotFound(format!("region {}", args.code)))?;
    render_navigation(&view);
    Ok(())
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let analysis = init_cli()?;
    let source = cli_source(&analysis, args.csv)?;

    let matches = search_by_name(&source, &args.query, args.level);
    if matches.is_empty() {
        println!("No region matches '{}'.", args.query);
    }
    for region in matches {
        println!("{}", describe(region));
    }
    Ok(())
}

fn build_comparison(
    source: &dyn RegionDataSource,
    first: &RegionCode,
    second: &RegionCode,
    year: i32,
) -> Result<RegionComparison, AppError> {
    let (first, second) = (lookup(source, first)?, lookup(source, second)?);

    compare_regions(first, second, year).ok_or_else(|| {
        AppError::NotFound(format!(
            "no {year} data for both {} and {}",
            first.code, second.code
        ))
    })
}

fn lookup<'a>(source: &'a dyn RegionDataSource, code: &RegionCode) -> Result<&'a Region, AppError> {
    source
        .region(code)
        .ok_or_else(|| AppError::NotFound(format!("region {code}")))
}

fn describe(region: &Region) -> String {
    format!(
        "{} ({}, {})",
        region.name,
        region.code,
        region.code.level().label()
    )
}

fn render_navigation(view: &Navigation<'_>) {
    let path: Vec<&str> = view
        .breadcrumb
        .iter()
        .map(|region| region.name.as_str())
        .collect();
    println!("{}", describe(view.region));
    println!("Path: {}", path.join(" > "));

    match view.parent {
        Some(parent) => println!("Parent: {}", describe(parent)),
        None => println!("Parent: -"),
    }

    for (heading, regions) in [("Children", &view.children), ("Siblings", &view.siblings)] {
        println!("{heading} ({}):", regions.len());
        for region in regions {
            println!("  - {}", describe(region));
        }
    }
}
