//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - Dashboard and sale-entry routes under `/api/v1`
//! - Authentication middleware and province scoping
//! - Query parameter parsing
//! - The `{status, message, data}` response envelope

pub mod error;
pub mod middleware;
pub mod params;
pub mod response;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;
use salesdash_core::dashboard::{DashboardAssembler, ReportCache};
use salesdash_core::facts::{FactRepository, SaleStore};
use salesdash_shared::{JwtService, ReportingConfig};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Report engine over the fact store.
    pub dashboard: Arc<DashboardAssembler<dyn FactRepository>>,
    /// Write path for sales.
    pub sales: Arc<dyn SaleStore>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Reporting settings (restricted roles, deadline, cache).
    pub reporting: Arc<ReportingConfig>,
    /// Timezone that defines "today" and "now".
    pub tz: Tz,
}

impl AppState {
    /// Wires the engine with the configured cache and deadline.
    #[must_use]
    pub fn new(
        facts: Arc<dyn FactRepository>,
        sales: Arc<dyn SaleStore>,
        jwt_service: JwtService,
        reporting: ReportingConfig,
        tz: Tz,
    ) -> Self {
        let cache = ReportCache::with_config(reporting.cache_capacity, reporting.cache_ttl_secs);
        let dashboard = DashboardAssembler::new(facts)
            .with_cache(cache)
            .with_deadline(reporting.request_timeout());
        Self {
            dashboard: Arc::new(dashboard),
            sales,
            jwt_service: Arc::new(jwt_service),
            reporting: Arc::new(reporting),
            tz,
        }
    }

    /// Current wall-clock time in the reporting timezone.
    #[must_use]
    pub fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.tz).naive_local()
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
