//! Health and metrics handlers.

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use super::super::SharedState;
use super::super::types::HealthResponse;
use super::json_response;
use crate::error::Result;

/// GET /health - Liveness check.
pub(crate) async fn health(State(state): State<SharedState>) -> Result<Response> {
    json_response(
        StatusCode::OK,
        &HealthResponse {
            status: "ready",
            timestamp: chrono::Utc::now().to_rfc3339(),
            entries: state.kv.len(),
        },
    )
}

/// GET /metrics - Prometheus text exposition.
pub(crate) async fn prometheus_metrics(State(state): State<SharedState>) -> Response {
    let body = state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response()
}
