pub mod errors;
pub mod metrics;
pub mod multipart;
pub mod openapi;
pub mod routes;
pub mod startup;

pub use startup::run;
