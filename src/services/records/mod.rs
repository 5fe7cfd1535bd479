//! Record aggregation service with pluggable backends.
//!
//! Validates a date/count filter into a [`Pipeline`] and runs it against a
//! record source:
//!
//! - **MongoBackend**: aggregation pipeline executed by MongoDB (production)
//! - **MemoryBackend**: the same predicate evaluated over records held in
//!   process (testing, or running without a database)
//!
//! # Custom Backends
//!
//! Implement the `RecordBackend` trait to plug in another store:
//!
//! ```ignore
//! use recordkv::services::records::{RecordBackend, RecordService};
//!
//! struct PostgresBackend { /* ... */ }
//! impl RecordBackend for PostgresBackend { /* ... */ }
//!
//! let service = RecordService::custom(PostgresBackend::new());
//! ```

mod backend;
mod memory;
mod mongo;
mod pipeline;
mod service;
mod types;

pub use backend::RecordBackend;
pub use memory::MemoryBackend;
pub use mongo::MongoBackend;
pub use pipeline::{Pipeline, PipelineError};
pub use service::RecordService;
pub use types::{Record, RecordQuery};
