//! Garment orders: creation rules, per-item production workflow and staff assignment.

pub mod customization;
pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;
pub mod workflow;

pub use service::OrderService;
