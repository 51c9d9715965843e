//! Staff accounts: validation, uniqueness, pin hashing, photo and document files.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::StaffService;
