//! Core reporting engine for Salesdash.
//!
//! This crate contains the sales-reporting logic with ZERO web or database
//! dependencies. Storage is reached through the [`facts::FactRepository`]
//! trait; everything else is pure computation over its rows.
//!
//! # Modules
//!
//! - `calendar` - Date ranges, time windows, granularities and slots
//! - `facts` - Fact and target records and the repository contract
//! - `targets` - Target resolution for ranges, days and years
//! - `aggregation` - Percentages, series, rankings and statistics
//! - `dashboard` - Report assembly, caching and deadlines

pub mod aggregation;
pub mod calendar;
pub mod dashboard;
pub mod facts;
pub mod targets;
