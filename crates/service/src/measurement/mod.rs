//! Body measurements recorded per customer and garment type.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::MeasurementService;
