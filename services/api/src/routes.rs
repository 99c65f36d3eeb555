use crate::infra::AppState;
use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sodapop::demographics::hierarchy::{navigation, search_by_name};
use sodapop::demographics::ranking::RankingSummary;
use sodapop::demographics::trend::{year_over_year, YearOverYearChange};
use sodapop::demographics::{
    analyze_region, compare_regions, summarize_regions_by, synthesize_report, trend_alert,
    AdminLevel, RankBy, RankedRegion, Region, RegionAnalysis, RegionCode, RegionComparison,
    RegionDataSource, RegionReport, TrendAlert,
};
use sodapop::error::AppError;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RankingQuery {
    pub(crate) year: Option<i32>,
    pub(crate) limit: Option<usize>,
    pub(crate) by: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchQuery {
    pub(crate) q: Option<String>,
    pub(crate) level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CompareQuery {
    pub(crate) first: Option<String>,
    pub(crate) second: Option<String>,
    pub(crate) year: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct YearQuery {
    pub(crate) year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RankingResponse {
    pub(crate) year: i32,
    pub(crate) limit: usize,
    pub(crate) rank_by: RankBy,
    pub(crate) summary: RankingSummary,
    pub(crate) regions: Vec<RankedRegion>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegionListing {
    pub(crate) code: RegionCode,
    pub(crate) name: String,
    pub(crate) level: &'static str,
    pub(crate) settlement: &'static str,
    pub(crate) years: Vec<i32>,
}

impl From<&Region> for RegionListing {
    fn from(region: &Region) -> Self {
        Self {
            code: region.code.clone(),
            name: region.name.clone(),
            level: region.code.level().label(),
            settlement: region.settlement.label(),
            years: region.years(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct NavigationResponse {
    pub(crate) region: RegionListing,
    pub(crate) parent: Option<RegionListing>,
    pub(crate) children: Vec<RegionListing>,
    pub(crate) siblings: Vec<RegionListing>,
    pub(crate) breadcrumb: Vec<RegionListing>,
}

fn listings(regions: &[&Region]) -> Vec<RegionListing> {
    regions.iter().map(|region| RegionListing::from(*region)).collect()
}

#[derive(Debug, Serialize)]
pub(crate) struct RegionDetailResponse {
    pub(crate) region: RegionListing,
    pub(crate) analysis: RegionAnalysis,
    pub(crate) changes: Vec<YearOverYearChange>,
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/rankings", get(rankings_endpoint))
        .route("/api/v1/regions", get(regions_endpoint))
        .route("/api/v1/regions/:code", get(region_detail_endpoint))
        .route("/api/v1/regions/:code/report", get(region_report_endpoint))
        .route("/api/v1/regions/:code/navigation", get(region_navigation_endpoint))
        .route("/api/v1/regions/:code/alert", get(region_alert_endpoint))
        .route("/api/v1/search", get(search_endpoint))
        .route("/api/v1/compare", get(compare_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready", "regions": state.source.len() })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn rankings_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<RankingQuery>,
) -> Result<Json<RankingResponse>, AppError> {
    let year = query.year.unwrap_or(state.analysis.report_year);
    let limit = query.limit.unwrap_or(state.analysis.ranking_limit);
    if limit == 0 {
        return Err(AppError::BadRequest("limit must be greater than zero".to_string()));
    }

    let rank_by = match query.by.as_deref() {
        None => RankBy::default(),
        Some(raw) => RankBy::from_label(raw)
            .ok_or_else(|| AppError::BadRequest(format!("unknown ranking measure '{raw}'")))?,
    };

    let (regions, summary) = summarize_regions_by(state.source.as_ref(), year, limit, rank_by);
    Ok(Json(RankingResponse {
        year,
        limit,
        rank_by,
        summary,
        regions,
    }))
}

pub(crate) async fn regions_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<Vec<RegionListing>> {
    Json(state.source.regions().map(RegionListing::from).collect())
}

pub(crate) async fn region_detail_endpoint(
    Extension(state): Extension<AppState>,
    Path(code): Path<String>,
    Query(query): Query<YearQuery>,
) -> Result<Json<RegionDetailResponse>, AppError> {
    let region = find_region(&state, &code)?;
    let analysis = analyze(&state, region, query.year)?;

    Ok(Json(RegionDetailResponse {
        region: RegionListing::from(region),
        analysis,
        changes: year_over_year(region),
    }))
}

pub(crate) async fn region_report_endpoint(
    Extension(state): Extension<AppState>,
    Path(code): Path<String>,
    Query(query): Query<YearQuery>,
) -> Result<Json<RegionReport>, AppError> {
    let region = find_region(&state, &code)?;
    let analysis = analyze(&state, region, query.year)?;
    let today = Local::now().date_naive();

    Ok(Json(synthesize_report(
        region,
        &analysis,
        &state.reference,
        today,
    )))
}

pub(crate) async fn region_navigation_endpoint(
    Extension(state): Extension<AppState>,
    Path(code): Path<String>,
) -> Result<Json<NavigationResponse>, AppError> {
    let region = find_region(&state, &code)?;
    let view = navigation(state.source.as_ref(), &region.code)
        .ok_or_else(|| AppError::NotFound(format!("region {}", region.code)))?;

    Ok(Json(NavigationResponse {
        region: RegionListing::from(view.region),
        parent: view.parent.map(RegionListing::from),
        children: listings(&view.children),
        siblings: listings(&view.siblings),
        breadcrumb: listings(&view.breadcrumb),
    }))
}

pub(crate) async fn region_alert_endpoint(
    Extension(state): Extension<AppState>,
    Path(code): Path<String>,
    Query(query): Query<YearQuery>,
) -> Result<Json<TrendAlert>, AppError> {
    let region = find_region(&state, &code)?;
    let analysis = analyze(&state, region, query.year)?;
    Ok(Json(trend_alert(region, &analysis)))
}

pub(crate) async fn search_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<RegionListing>>, AppError> {
    let Some(needle) = query.q.as_deref().filter(|q| !q.trim().is_empty()) else {
        return Err(AppError::BadRequest("query parameter 'q' is required".to_string()));
    };
    let level = match query.level.as_deref() {
        None => None,
        Some(raw) => Some(
            AdminLevel::from_label(raw)
                .ok_or_else(|| AppError::BadRequest(format!("unknown administrative level '{raw}'")))?,
        ),
    };

    Ok(Json(listings(&search_by_name(state.source.as_ref(), needle, level))))
}

pub(crate) async fn compare_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<RegionComparison>, AppError> {
    let (Some(first), Some(second)) = (query.first.as_deref(), query.second.as_deref()) else {
        return Err(AppError::BadRequest(
            "query parameters 'first' and 'second' are required".to_string(),
        ));
    };
    let first = find_region(&state, first)?;
    let second = find_region(&state, second)?;
    let year = query.year.unwrap_or(state.analysis.report_year);

    compare_regions(first, second, year).map(Json).ok_or_else(|| {
        AppError::NotFound(format!(
            "no {year} data for both {} and {}",
            first.code, second.code
        ))
    })
}

fn find_region<'a>(state: &'a AppState, raw: &str) -> Result<&'a Region, AppError> {
    let code = RegionCode::parse(raw).map_err(|err| AppError::BadRequest(err.to_string()))?;
    state
        .source
        .region(&code)
        .ok_or_else(|| AppError::NotFound(format!("region {code}")))
}

fn analyze(state: &AppState, region: &Region, year: Option<i32>) -> Result<RegionAnalysis, AppError> {
    let year = year.unwrap_or(state.analysis.report_year);
    analyze_region(region, year)
        .ok_or_else(|| AppError::NotFound(format!("no {year} data for region {}", region.code)))
}
