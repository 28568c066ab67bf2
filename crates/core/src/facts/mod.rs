//! Sale facts, target records and the repository seam.
//!
//! The engine reads facts only through [`FactRepository`]. Adapters parse
//! stored text (quantities, month names, week numbers) once at the boundary
//! so aggregation only ever sees typed values.

pub mod error;
pub mod memory;
pub mod quantity;
pub mod repository;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::FactError;
pub use memory::InMemoryFactRepository;
pub use quantity::parse_quantity;
pub use repository::{FactRepository, NewSale, SaleStore};
pub use types::{
    DailyTotal, HourlyTotal, MonthTarget, Province, SaleEvent, WeekTarget, YearTarget,
};
