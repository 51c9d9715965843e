//! Blob store for staff photos, identity documents and order images.

pub mod repository;
pub mod repo;
pub mod store;

pub use store::{FileContent, FileStore, FileUpload};
