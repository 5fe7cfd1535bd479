//! Aggregation pipeline construction.
//!
//! Turns a [`RecordQuery`] into a validated [`Pipeline`]. The pipeline can be
//! rendered as MongoDB stage documents or evaluated in process, and both
//! paths apply the same exclusive bounds.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mongodb::bson::{self, Document, doc};

use super::types::RecordQuery;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reasons a [`RecordQuery`] cannot become a [`Pipeline`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    /// Count or date bounds are inverted.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// A date is not a calendar date in `YYYY-MM-DD` form.
    #[error("invalid {field} '{value}': expected YYYY-MM-DD")]
    InvalidDateFormat { field: &'static str, value: String },
}

/// A validated record filter.
///
/// All four bounds are exclusive: a record matches when its creation time is
/// strictly between `start` and `end` and its total count is strictly
/// between `min_count` and `max_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    min_count: i64,
    max_count: i64,
}

impl Pipeline {
    /// Validates `query` and builds the pipeline.
    ///
    /// Checks run in a fixed order: count range, then date format, then
    /// date order.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::InvalidRange`] if `maxCount < minCount`, or if the
    ///   start date is after the end date
    /// - [`PipelineError::InvalidDateFormat`] if either date does not parse
    pub fn build(query: &RecordQuery) -> Result<Self, PipelineError> {
        if query.max_count < query.min_count {
            return Err(PipelineError::InvalidRange(format!(
                "maxCount ({}) is less than minCount ({})",
                query.max_count, query.min_count
            )));
        }

        let start = parse_date("startDate", &query.start_date)?;
        let end = parse_date("endDate", &query.end_date)?;

        if start > end {
            return Err(PipelineError::InvalidRange(format!(
                "startDate ({}) is after endDate ({})",
                query.start_date, query.end_date
            )));
        }

        Ok(Self {
            start,
            end,
            min_count: query.min_count,
            max_count: query.max_count,
        })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn min_count(&self) -> i64 {
        self.min_count
    }

    pub fn max_count(&self) -> i64 {
        self.max_count
    }

    /// Renders the MongoDB aggregation stages.
    ///
    /// A `$project` stage derives `totalCount` from `$counts`, then a
    /// `$match` stage applies the bounds to the derived value.
    pub fn stages(&self) -> Vec<Document> {
        let start = bson::DateTime::from_millis(self.start.timestamp_millis());
        let end = bson::DateTime::from_millis(self.end.timestamp_millis());

        vec![
            doc! {
                "$project": {
                    "key": 1,
                    "val": 1,
                    "createdAt": 1,
                    "counts": 1,
                    "totalCount": { "$sum": "$counts" }
                }
            },
            doc! {
                "$match": {
                    "$and": [
                        { "createdAt": { "$gt": start } },
                        { "createdAt": { "$lt": end } },
                        { "totalCount": { "$gt": self.min_count } },
                        { "totalCount": { "$lt": self.max_count } }
                    ]
                }
            },
        ]
    }

    /// Evaluates the `$match` predicate in process.
    pub fn matches(&self, created_at: DateTime<Utc>, total_count: i64) -> bool {
        created_at > self.start
            && created_at < self.end
            && total_count > self.min_count
            && total_count < self.max_count
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<DateTime<Utc>, PipelineError> {
    let invalid = || PipelineError::InvalidDateFormat {
        field,
        value: value.to_string(),
    };

    // chrono accepts single-digit months and days; the wire format does not.
    if value.len() != 10 {
        return Err(invalid());
    }

    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}
