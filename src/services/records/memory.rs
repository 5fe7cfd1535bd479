//! In-memory records backend.
//!
//! Evaluates pipelines against a fixed set of records held in process.
//! Ideal for tests and for running the service without a database.

use super::backend::RecordBackend;
use super::pipeline::Pipeline;
use super::types::Record;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;

/// Records backend over a static `Vec<Record>`.
///
/// Any stored `total_count` is ignored; totals are recomputed from `counts`
/// on every query, same as the `$sum` projection in MongoDB.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    records: Vec<Record>,
}

impl MemoryBackend {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Loads records from a JSON array file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON array
    /// of records.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixtures file: {}", path.display()))?;
        let records: Vec<Record> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse fixtures file: {}", path.display()))?;
        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RecordBackend for MemoryBackend {
    async fn aggregate(&self, pipeline: &Pipeline) -> Result<Vec<Record>> {
        Ok(self
            .records
            .iter()
            .filter_map(|record| {
                let total = record.computed_total();
                pipeline.matches(record.created_at, total).then(|| Record {
                    total_count: total,
                    ..record.clone()
                })
            })
            .collect())
    }
}
