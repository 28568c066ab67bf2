//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for provinces, sales and targets
//! - [`SeaOrmFactRepository`], the PostgreSQL implementation of the fact seam
//! - [`SaleRepository`], the single write path for sales
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{SaleError, SaleRepository, SeaOrmFactRepository};

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use salesdash_shared::config::DatabaseConfig;

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Establishes a pooled connection sized from configuration.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .sqlx_logging(false);
    Database::connect(options).await
}
