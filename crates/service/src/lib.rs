//! Service layer providing business operations on top of `models`.
//! - Repository traits separate business rules from data access; each has a
//!   SeaORM implementation and an in-memory mock for tests.
//! - Reuses validation and entity definitions from the `models` crate.
//! - The order item workflow and customization rules are pure functions in
//!   [`order::workflow`] and [`order::customization`].

pub mod errors;
pub mod pagination;
pub mod files;
pub mod auth;
pub mod staff;
pub mod customer;
pub mod measurement;
pub mod order;
#[cfg(test)]
pub mod test_support;
