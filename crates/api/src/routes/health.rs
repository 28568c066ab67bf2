//! Health check endpoint.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;

use crate::{
    AppState,
    response::{ApiResponse, success},
};

/// Health check payload.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Reporting timezone.
    pub timezone: &'static str,
}

/// Health check handler.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<ApiResponse<HealthStatus>>) {
    success(
        "Service is healthy",
        HealthStatus {
            status: "healthy",
            version: env!("CARGO_PKG_VERSION"),
            timezone: state.tz.name(),
        },
    )
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
