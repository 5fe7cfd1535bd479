//! In-memory store handlers.

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::debug;

use super::super::types::KvEntry;
use super::super::{SharedState, metrics};
use super::{json_response, read_json};
use crate::constants::CONTENT_TYPE_JSON;
use crate::error::{AppError, Result};

/// POST /inmemory - Store a key-value pair.
pub(crate) async fn inmemory_set(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Response> {
    let entry: KvEntry = read_json(&headers, body)?;

    metrics::record_kv_operation("set");
    debug!(key = %entry.key, "Storing in-memory entry");
    state.kv.set(entry.key, entry.value);

    Ok((StatusCode::CREATED, [(header::CONTENT_TYPE, CONTENT_TYPE_JSON)]).into_response())
}

/// GET /inmemory?key=... - Read a value.
///
/// Only the first `key` parameter counts; a missing one looks up the
/// empty key.
pub(crate) async fn inmemory_get(
    State(state): State<SharedState>,
    query: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response> {
    let Query(pairs) = query.map_err(AppError::invalid_body)?;
    let key = first_key(pairs);

    let Some(value) = state.kv.get(&key) else {
        metrics::record_kv_operation("miss");
        return Err(AppError::NotFound(format!("key '{key}'")));
    };

    metrics::record_kv_operation("get");
    json_response(StatusCode::OK, &KvEntry { key, value })
}

fn first_key(pairs: Vec<(String, String)>) -> String {
    pairs
        .into_iter()
        .find_map(|(name, value)| (name == "key").then_some(value))
        .unwrap_or_default()
}
