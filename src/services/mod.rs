//! Backing services for the HTTP handlers.
//!
//! - [`kv`] - Process-wide in-memory key-value store
//! - [`records`] - Date/count bounded record aggregation

pub mod kv;
pub mod records;
