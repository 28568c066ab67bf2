//! Repository implementations over the reporting store.

pub mod facts;
pub mod sales;

pub use facts::SeaOrmFactRepository;
pub use sales::{SaleError, SaleRepository};
