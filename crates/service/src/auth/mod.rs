//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Staff sign in with username and security pin and receive a signed token.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::{hash_pin, verify_pin, AuthConfig, AuthService};
