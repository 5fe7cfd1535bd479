//! HTTP API handlers organized by endpoint.
//!
//! Body-carrying handlers validate in a fixed order: method (via the
//! route's method fallback), content type, body decoding, then domain
//! checks. Responses are encoded into a buffer before anything is sent.

pub mod health;
pub mod inmemory;
pub mod records;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::constants::CONTENT_TYPE_JSON;
use crate::error::{AppError, Result};

// Re-export all handlers for use in routing
pub(crate) use health::{health, prometheus_metrics};
pub(crate) use inmemory::{inmemory_get, inmemory_set};
pub(crate) use records::records_query;

/// Method fallback for every route.
pub(crate) async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Router fallback for unknown paths.
pub(crate) async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for '{}'", uri.path()))
}

/// Rejects bodies whose content type is not exactly `application/json`.
pub(crate) fn require_json(headers: &HeaderMap) -> Result<()> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    if content_type == Some(CONTENT_TYPE_JSON) {
        Ok(())
    } else {
        Err(AppError::UnsupportedContentType)
    }
}

/// Decodes a JSON body, mapping any failure to `InvalidBody`.
pub(crate) fn decode_json<T: DeserializeOwned>(body: &Bytes) -> Result<T> {
    serde_json::from_slice(body).map_err(AppError::invalid_body)
}

/// Content type, then buffering, then decoding.
///
/// The body arrives as a `Result` so that a buffering failure (for example
/// the length limit) cannot preempt the content-type check.
pub(crate) fn read_json<T: DeserializeOwned>(
    headers: &HeaderMap,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<T> {
    require_json(headers)?;
    let body = body.map_err(|rejection| AppError::invalid_body(rejection.body_text()))?;
    decode_json(&body)
}

/// Serializes `body` fully before building the response.
pub(crate) fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Result<Response> {
    let bytes = serde_json::to_vec(body)
        .map_err(|e| AppError::Internal(format!("Failed to encode response: {e}")))?;
    Ok((status, [(header::CONTENT_TYPE, CONTENT_TYPE_JSON)], bytes).into_response())
}
