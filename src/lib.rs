//! recordkv - record queries and an in-memory key-value store over HTTP.
//!
//! - [`services::kv`] - Process-wide concurrent string map
//! - [`services::records`] - Validated aggregation pipelines over MongoDB or
//!   in-memory records
//! - [`server`] - axum router, handlers, and middleware
//! - [`config`] - File and environment configuration
//! - [`error`] - Request error taxonomy and its HTTP mapping

pub mod config;
pub mod constants;
pub mod error;
pub mod server;
pub mod services;

pub use error::AppError;
