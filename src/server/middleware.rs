//! Request correlation and access logging.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use super::metrics;
use crate::constants::REQUEST_ID_HEADER;

/// Longest client-supplied request id that is echoed back.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Tag each request with an id, run it inside a tracing span, and log
/// its outcome.
///
/// An incoming `x-request-id` is reused when it is a short printable value;
/// otherwise a UUID v4 is generated. The id is always echoed in the
/// response.
pub async fn request_context(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_owned);

    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let span = info_span!("request", %method, %path, %request_id);

    let start = Instant::now();
    let mut response = next.run(request).instrument(span.clone()).await;
    let elapsed = start.elapsed();
    let status = response.status().as_u16();

    span.in_scope(|| {
        info!(
            status,
            latency_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            "Request completed"
        );
    });
    metrics::record_request(endpoint_label(&path), status, elapsed);

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Bounded metric label for a request path.
fn endpoint_label(path: &str) -> &'static str {
    match path {
        "/records" => "records",
        "/inmemory" => "inmemory",
        "/health" => "health",
        "/metrics" => "metrics",
        _ => "unmatched",
    }
}
