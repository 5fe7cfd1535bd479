//! Type definitions for the records service.
//!
//! Contains the request filter, the record shape returned to clients, and
//! the raw document shape decoded from the aggregation cursor.

use chrono::{DateTime, Utc};
use mongodb::bson;
use serde::{Deserialize, Serialize};

/// Filter supplied in the body of `POST /records`.
///
/// Dates are `YYYY-MM-DD` strings; they are parsed and range-checked by
/// [`Pipeline::build`](super::Pipeline::build), not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordQuery {
    pub start_date: String,
    pub end_date: String,
    pub min_count: i64,
    pub max_count: i64,
}

impl RecordQuery {
    pub fn new(
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        min_count: i64,
        max_count: i64,
    ) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
            min_count,
            max_count,
        }
    }
}

/// A record matched by an aggregation query.
///
/// `total_count` is derived from `counts` on every query. When records are
/// loaded from a fixtures file the field may be omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub key: String,
    #[serde(default)]
    pub val: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub counts: Vec<i64>,
    #[serde(default)]
    pub total_count: i64,
}

impl Record {
    /// Sum of `counts`, saturating instead of overflowing.
    pub fn computed_total(&self) -> i64 {
        self.counts.iter().fold(0i64, |acc, c| acc.saturating_add(*c))
    }
}

/// Document shape produced by the `$project` stage.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecordDocument {
    #[serde(default)]
    key: String,
    #[serde(default)]
    val: String,
    created_at: bson::DateTime,
    #[serde(default)]
    counts: Vec<i64>,
    #[serde(default)]
    total_count: i64,
}

impl TryFrom<RecordDocument> for Record {
    type Error = anyhow::Error;

    fn try_from(doc: RecordDocument) -> anyhow::Result<Self> {
        let millis = doc.created_at.timestamp_millis();
        let Some(created_at) = DateTime::from_timestamp_millis(millis) else {
            anyhow::bail!("record '{}' has out-of-range createdAt ({millis} ms)", doc.key);
        };
        Ok(Self {
            key: doc.key,
            val: doc.val,
            created_at,
            counts: doc.counts,
            total_count: doc.total_count,
        })
    }
}
