//! Salesdash API Server
//!
//! Main entry point for the sales reporting backend.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use salesdash_api::{AppState, create_router};
use salesdash_db::{SaleRepository, SeaOrmFactRepository, connect_with};
use salesdash_shared::{AppConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "salesdash=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    let tz = config.reporting.tz()?;

    let db = connect_with(&config.database).await?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    let facts = Arc::new(SeaOrmFactRepository::new(db.clone(), tz));
    let sales = Arc::new(SaleRepository::new(db, tz));
    let jwt_service = JwtService::new(&config.jwt);

    info!(
        timezone = %tz,
        request_timeout_secs = config.reporting.request_timeout_secs,
        cache_ttl_secs = config.reporting.cache_ttl_secs,
        "Reporting engine configured"
    );
    let state = AppState::new(facts, sales, jwt_service, config.reporting.clone(), tz);

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
