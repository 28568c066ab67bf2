//! Shared types, errors, and configuration for Salesdash.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management
//! - JWT claims and province scoping of authenticated principals

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::{Claims, ProvinceScope, ScopeError};
pub use config::{AppConfig, JwtConfig, ReportingConfig};
pub use error::{AppError, AppResult};
pub use jwt::{JwtError, JwtService};
