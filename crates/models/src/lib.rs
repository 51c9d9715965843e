//! SeaORM entities for the tailoring back office, plus field validation and connection helpers.

pub mod errors;
pub mod db;
pub mod validation;
pub mod staff;
pub mod customer;
pub mod measurement;
pub mod order;
pub mod stored_file;

#[cfg(test)]
mod tests;
