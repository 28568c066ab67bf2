//! Dashboard routes.
//!
//! Each handler parses the query string, narrows the province scope to what
//! the caller may see and hands a typed query to the assembler.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use salesdash_core::dashboard::{
    AnalyticsQuery, ComparisonSummary, DailyMonitor, DailyQuery, GlobalOverview,
    HistoricalQuery, HistoricalTrends, OverallSummaryDashboard, ProvinceYearSummary,
    ProvincialAnalysis, RangeQuery, SalesAnalytics, YearObjectiveProgress, YearObjectiveRow,
    YearQuery,
};
use salesdash_shared::{AppError, ProvinceScope};

use crate::{
    AppState,
    error::ApiError,
    middleware::AuthUser,
    params::DashboardParams,
    response::{ApiResponse, success},
};

type Reply<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

/// Creates the dashboard routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/daily-monitor", get(daily_monitor))
        .route("/dashboard/global-overview", get(global_overview))
        .route("/dashboard/provincial-analysis", get(provincial_analysis))
        .route("/dashboard/historical-trends", get(historical_trends))
        .route("/dashboard/year-objectives", get(year_objectives))
        .route("/dashboard/year-objectives/table", get(year_objective_table))
        .route("/dashboard/province-year-summary", get(province_year_summary))
        .route("/dashboard/overall-summary", get(overall_summary))
        .route("/dashboard/comparison-summary", get(comparison_summary))
        .route("/dashboard/sales-analytics", get(sales_analytics))
}

fn scope_of(
    state: &AppState,
    auth: &AuthUser,
    params: &DashboardParams,
) -> Result<ProvinceScope, ApiError> {
    auth.scope(&state.reporting, params.requested_scope()?)
}

fn year_query(state: &AppState, auth: &AuthUser, params: &DashboardParams) -> Result<YearQuery, ApiError> {
    let today = state.now().date();
    Ok(YearQuery {
        year: params.year(today)?,
        today,
        scope: scope_of(state, auth, params)?,
    })
}

fn range_query(state: &AppState, auth: &AuthUser, params: &DashboardParams) -> Result<RangeQuery, ApiError> {
    Ok(RangeQuery {
        range: params.range(state.now().date())?,
        granularity: params.granularity()?,
        scope: scope_of(state, auth, params)?,
    })
}

/// GET /dashboard/daily-monitor
async fn daily_monitor(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<DashboardParams>,
) -> Reply<DailyMonitor> {
    let now = state.now();
    let query = DailyQuery {
        day: params.date(now.date())?,
        now,
        scope: scope_of(&state, &auth, &params)?,
    };
    let report = state.dashboard.daily_monitor(query).await?;
    Ok(success("Daily monitor data retrieved successfully", report))
}

/// GET /dashboard/global-overview
async fn global_overview(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<DashboardParams>,
) -> Reply<GlobalOverview> {
    let query = range_query(&state, &auth, &params)?;
    let report = state.dashboard.global_overview(query).await?;
    Ok(success("Global overview data retrieved successfully", report))
}

/// GET /dashboard/provincial-analysis
async fn provincial_analysis(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<DashboardParams>,
) -> Reply<ProvincialAnalysis> {
    let query = range_query(&state, &auth, &params)?;
    let report = state.dashboard.provincial_analysis(query).await?;
    Ok(success("Provincial analysis data retrieved successfully", report))
}

/// GET /dashboard/historical-trends
async fn historical_trends(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<DashboardParams>,
) -> Reply<HistoricalTrends> {
    let query = HistoricalQuery {
        years: params.years(state.now().date())?,
        view_by: params.view_by()?,
        scope: scope_of(&state, &auth, &params)?,
    };
    let report = state.dashboard.historical_trends(query).await?;
    Ok(success("Historical trends data retrieved successfully", report))
}

/// GET /dashboard/year-objectives
async fn year_objectives(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<DashboardParams>,
) -> Reply<Vec<YearObjectiveProgress>> {
    let query = year_query(&state, &auth, &params)?;
    let report = state.dashboard.year_objectives(query).await?;
    Ok(success("Year objectives retrieved successfully", report))
}

/// GET /dashboard/year-objectives/table
async fn year_objective_table(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<DashboardParams>,
) -> Reply<Vec<YearObjectiveRow>> {
    let query = year_query(&state, &auth, &params)?;
    let report = state.dashboard.year_objective_table(query).await?;
    Ok(success("Year objectives table retrieved successfully", report))
}

/// GET /dashboard/province-year-summary
async fn province_year_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<DashboardParams>,
) -> Reply<Vec<ProvinceYearSummary>> {
    let query = year_query(&state, &auth, &params)?;
    let report = state.dashboard.province_year_summaries(query).await?;
    Ok(success("Province year summary retrieved successfully", report))
}

/// GET /dashboard/overall-summary
async fn overall_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<DashboardParams>,
) -> Reply<OverallSummaryDashboard> {
    let query = year_query(&state, &auth, &params)?;
    let report = state.dashboard.overall_summary(query).await?;
    Ok(success("Overall summary retrieved successfully", report))
}

/// GET /dashboard/comparison-summary
async fn comparison_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<DashboardParams>,
) -> Reply<ComparisonSummary> {
    let query = year_query(&state, &auth, &params)?;
    let report = state.dashboard.comparison_summary(query).await?;
    Ok(success("Comparison summary retrieved successfully", report))
}

/// GET /dashboard/sales-analytics
async fn sales_analytics(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<DashboardParams>,
) -> Reply<SalesAnalytics> {
    let today = state.now().date();
    let year = params.year(today)?;
    let anchor = match params.date_opt()? {
        Some(day) => day,
        None => AnalyticsQuery::default_anchor(year, today)
            .ok_or_else(|| AppError::Validation(format!("Year {year} is out of range")))?,
    };
    let query = AnalyticsQuery {
        period: params.period()?,
        anchor,
        year,
        scope: scope_of(&state, &auth, &params)?,
    };
    let report = state.dashboard.sales_analytics(query).await?;
    Ok(success("Sales analytics retrieved successfully", report))
}
