//! Record aggregation handler.

use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use tracing::debug;

use super::super::types::RecordsResponse;
use super::super::{SharedState, metrics};
use super::{json_response, read_json};
use crate::error::Result;
use crate::services::records::{Pipeline, RecordQuery};

/// POST /records - Query records by creation date and total count.
pub(crate) async fn records_query(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Response> {
    let query: RecordQuery = read_json(&headers, body)?;
    let pipeline = Pipeline::build(&query)?;

    debug!(
        start = %pipeline.start(),
        end = %pipeline.end(),
        min_count = pipeline.min_count(),
        max_count = pipeline.max_count(),
        "Running records aggregation"
    );
    let records = state.records.aggregate(&pipeline).await?;
    metrics::record_records_matched(records.len());

    json_response(StatusCode::OK, &RecordsResponse::success(records))
}
