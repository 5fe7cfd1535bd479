//! Backend trait for the records service.
//!
//! Defines the interface every aggregation executor implements, so the
//! HTTP layer does not care whether records come from MongoDB or memory.

use super::pipeline::Pipeline;
use super::types::Record;
use anyhow::Result;
use async_trait::async_trait;

/// Executes a validated [`Pipeline`] against a record source.
///
/// All backends must be thread-safe (`Send + Sync`) for use with tokio.
///
/// # Example
///
/// ```ignore
/// use recordkv::services::records::{MemoryBackend, Pipeline, RecordBackend, RecordQuery};
///
/// let backend = MemoryBackend::new(Vec::new());
/// let pipeline = Pipeline::build(&RecordQuery::new("2020-01-02", "2021-01-02", 0, 10))?;
/// let records = backend.aggregate(&pipeline).await?;
/// ```
#[async_trait]
pub trait RecordBackend: Send + Sync + 'static {
    /// Returns every record the pipeline matches, with `total_count` set to
    /// the sum of the record's counts.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be queried or a
    /// result cannot be decoded.
    async fn aggregate(&self, pipeline: &Pipeline) -> Result<Vec<Record>>;

    /// Releases connections held by the backend.
    ///
    /// Called once at process shutdown. The default does nothing.
    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}
