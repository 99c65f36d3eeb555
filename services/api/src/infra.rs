use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use sodapop::config::AnalysisConfig;
use sodapop::demographics::{
    AdminLevel, CsvRegionLoader, InMemoryRegionSource, NationalReference, RankBy, RegionCode,
    SyntheticRegionGenerator,
};
use sodapop::error::AppError;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) source: Arc<InMemoryRegionSource>,
    pub(crate) analysis: AnalysisConfig,
    pub(crate) reference: NationalReference,
}

/// Loads the configured CSV export, or falls back to seeded synthetic data.
pub(crate) fn load_region_source(
    analysis: &AnalysisConfig,
) -> Result<InMemoryRegionSource, AppError> {
    match analysis.data_csv.as_deref() {
        Some(path) => load_csv(path),
        None => {
            info!(
                seed = analysis.synthetic_seed,
                "no CSV export configured; using synthetic region data"
            );
            Ok(SyntheticRegionGenerator::new(analysis.synthetic_seed).generate())
        }
    }
}

pub(crate) fn load_csv(path: &Path) -> Result<InMemoryRegionSource, AppError> {
    Ok(CsvRegionLoader::from_path(path)?)
}

pub(crate) fn parse_region_code(raw: &str) -> Result<RegionCode, String> {
    RegionCode::parse(raw).map_err(|err| err.to_string())
}

pub(crate) fn parse_limit(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err("limit must be greater than zero".to_string()),
        Ok(limit) => Ok(limit),
        Err(err) => Err(format!("failed to parse '{raw}' as a limit ({err})")),
    }
}

pub(crate) fn parse_rank_by(raw: &str) -> Result<RankBy, String> {
    RankBy::from_label(raw).ok_or_else(|| {
        format!("unknown ranking measure '{raw}' (urgency, aging_velocity, old_old_velocity)")
    })
}

pub(crate) fn parse_admin_level(raw: &str) -> Result<AdminLevel, String> {
    AdminLevel::from_label(raw).ok_or_else(|| {
        format!("unknown administrative level '{raw}' (province, municipality, neighborhood)")
    })
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_fallback_uses_configured_seed() {
        let config = AnalysisConfig {
            synthetic_seed: 7,
            ..AnalysisConfig::default()
        };
        let source = load_region_source(&config).expect("synthetic data loads");
        assert_eq!(source.len(), 27);
    }

    #[test]
    fn missing_csv_is_reported_as_data_source_error() {
        let config = AnalysisConfig {
            data_csv: Some("/nonexistent/sodapop/regions.csv".into()),
            ..AnalysisConfig::default()
        };
        let err = load_region_source(&config).expect_err("missing file fails");
        assert!(matches!(err, AppError::DataSource(_)));
    }

    #[test]
    fn region_codes_are_normalised_for_clap() {
        let code = parse_region_code("11680").expect("short code pads");
        assert_eq!(code.as_str(), "1168000000");
        assert!(parse_region_code("gangnam").is_err());
        assert!(parse_date("2025-13-01").is_err());
        assert_eq!(parse_limit("5"), Ok(5));
        assert!(parse_limit("0").is_err());
    }

    #[test]
    fn ranking_measures_and_levels_parse_for_clap() {
        assert_eq!(parse_rank_by("old-old-velocity"), Ok(RankBy::OldOldVelocity));
        assert!(parse_rank_by("households").is_err());
        assert_eq!(parse_admin_level("읍면동"), Ok(AdminLevel::Neighborhood));
        assert!(parse_admin_level("ward").is_err());
    }
}
