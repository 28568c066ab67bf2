//! Target resolution over the Year -> Month -> Week hierarchy.
//!
//! A missing record at any level resolves to zero, never to an error.

pub mod plan;
pub mod resolver;

#[cfg(test)]
mod tests;

pub use plan::{ProvincePlan, YearPlan};
pub use resolver::{TargetPath, TargetResolver};
