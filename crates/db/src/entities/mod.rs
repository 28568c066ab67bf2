//! `SeaORM` entities for the reporting store.

pub mod months;
pub mod provinces;
pub mod sales;
pub mod weeks;
pub mod years;

pub mod prelude {
    //! Entity re-exports.
    pub use super::months::Entity as Months;
    pub use super::provinces::Entity as Provinces;
    pub use super::sales::Entity as Sales;
    pub use super::weeks::Entity as Weeks;
    pub use super::years::Entity as Years;
}
