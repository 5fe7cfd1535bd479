//! High-level `RecordService` wrapper over backend implementations.

use super::backend::RecordBackend;
use super::memory::MemoryBackend;
use super::mongo::MongoBackend;
use super::pipeline::Pipeline;
use super::types::Record;
use anyhow::Result;
use std::sync::Arc;

/// Aggregation executor shared by every `/records` request.
///
/// `RecordService` is `Clone`; clones share the same backend.
///
/// # Example
///
/// ```ignore
/// use recordkv::services::records::{RecordService, Pipeline, RecordQuery};
///
/// let service = RecordService::mongo("mongodb://localhost", "getir-case-study", "records").await?;
/// let pipeline = Pipeline::build(&RecordQuery::new("2016-01-26", "2018-02-02", 2700, 3000))?;
/// let records = service.aggregate(&pipeline).await?;
/// ```
#[derive(Clone)]
pub struct RecordService {
    backend: Arc<dyn RecordBackend>,
}

impl RecordService {
    /// Creates a service backed by a MongoDB collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub async fn mongo(uri: &str, database: &str, collection: &str) -> Result<Self> {
        let backend = MongoBackend::connect(uri, database, collection).await?;
        Ok(Self::custom(backend))
    }

    /// Creates a service over a fixed set of in-memory records.
    pub fn memory(records: Vec<Record>) -> Self {
        Self::custom(MemoryBackend::new(records))
    }

    /// Creates a service with a custom backend.
    pub fn custom<B: RecordBackend>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Runs `pipeline` against the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub async fn aggregate(&self, pipeline: &Pipeline) -> Result<Vec<Record>> {
        self.backend.aggregate(pipeline).await
    }

    /// Releases backend connections.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to shut down cleanly.
    pub async fn shutdown(&self) -> Result<()> {
        self.backend.shutdown().await
    }
}
