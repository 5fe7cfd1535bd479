//! Request and response bodies for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::services::records::Record;

/// Body of `POST /inmemory` and of a successful `GET /inmemory`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvEntry {
    pub key: String,
    pub value: String,
}

impl KvEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Body of a successful `POST /records`.
#[derive(Debug, Serialize)]
pub struct RecordsResponse {
    pub code: i32,
    pub msg: String,
    pub records: Vec<Record>,
}

impl RecordsResponse {
    pub fn success(records: Vec<Record>) -> Self {
        Self {
            code: 0,
            msg: "success".to_string(),
            records,
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    /// Number of entries in the in-memory store.
    pub entries: usize,
}
