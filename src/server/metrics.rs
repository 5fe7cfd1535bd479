//! Prometheus metrics for the HTTP API.
//!
//! Counters are recorded through the `metrics` facade; the Prometheus
//! recorder is installed once by `main` and rendered at `/metrics`.

use anyhow::{Context, Result};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Install the global Prometheus recorder.
///
/// # Errors
///
/// Returns an error if a global recorder is already installed.
pub fn install_recorder() -> Result<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")
}

/// Record a completed request.
pub fn record_request(endpoint: &'static str, status: u16, elapsed: Duration) {
    ::metrics::counter!(
        "recordkv_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("recordkv_request_duration_seconds", "endpoint" => endpoint)
        .record(elapsed.as_secs_f64());
}

/// Record an in-memory store operation (`get`, `set`, `miss`).
pub fn record_kv_operation(op: &'static str) {
    ::metrics::counter!("recordkv_kv_operations_total", "op" => op).increment(1);
}

/// Record how many documents an aggregation returned.
#[allow(clippy::cast_precision_loss)]
pub fn record_records_matched(count: usize) {
    ::metrics::histogram!("recordkv_records_matched").record(count as f64);
}
