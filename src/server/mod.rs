//! HTTP server for recordkv.
//!
//! Routes:
//! - `POST /records` - Date/count bounded record query
//! - `GET /inmemory?key=` - Read from the in-memory store
//! - `POST /inmemory` - Write to the in-memory store
//! - `GET /health` - Liveness check
//! - `GET /metrics` - Prometheus metrics
//!
//! Any other method on a known path is a 405, HEAD included; unknown paths
//! are a 404.
//! Every response carries an `x-request-id` header.

pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod types;

use anyhow::{Context, Result};
use axum::Router;
use axum::handler::Handler;
use axum::routing::{MethodRouter, get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::{Config, RecordsBackendKind};
use crate::services::kv::KvStore;
use crate::services::records::{MemoryBackend, RecordService};

/// Dependencies shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub kv: KvStore,
    pub records: RecordService,
    /// `None` when no Prometheus recorder is installed (tests, embedding).
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(kv: KvStore, records: RecordService) -> Self {
        Self {
            kv,
            records,
            metrics: None,
        }
    }

    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Build state from configuration, connecting to the record backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the MongoDB connection fails or the fixtures
    /// file cannot be loaded.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let kv = KvStore::with_entries(config.inmemory.seed.clone());
        if !kv.is_empty() {
            info!(entries = kv.len(), "Seeded in-memory store");
        }

        let records = match config.records.backend {
            RecordsBackendKind::Mongo => {
                let uri = config
                    .records
                    .uri
                    .as_deref()
                    .context("records.uri is required for the mongo backend")?;
                RecordService::mongo(uri, &config.records.database, &config.records.collection)
                    .await?
            },
            RecordsBackendKind::Memory => {
                let backend = match &config.records.fixtures {
                    Some(path) => MemoryBackend::from_file(path)?,
                    None => MemoryBackend::default(),
                };
                info!(records = backend.len(), "Using in-memory records backend");
                RecordService::custom(backend)
            },
        };

        Ok(Self::new(kv, records))
    }
}

/// Shared application state handed to handlers.
pub type SharedState = Arc<AppState>;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/records",
            post(handlers::records_query).fallback(handlers::method_not_allowed),
        )
        .route(
            "/inmemory",
            get_only(handlers::inmemory_get).post(handlers::inmemory_set),
        )
        .route("/health", get_only(handlers::health))
        .route("/metrics", get_only(handlers::prometheus_metrics))
        .fallback(handlers::not_found)
        .layer(axum::middleware::from_fn(middleware::request_context))
        .with_state(Arc::new(state))
}

/// GET route where every other method is a 405.
///
/// axum answers HEAD with the GET handler unless HEAD has its own endpoint.
fn get_only<H, T>(handler: H) -> MethodRouter<SharedState>
where
    H: Handler<T, SharedState>,
    T: 'static,
{
    get(handler)
        .head(handlers::method_not_allowed)
        .fallback(handlers::method_not_allowed)
}

/// Serve requests on `listener` until Ctrl+C or SIGTERM, then release the
/// record backend.
///
/// # Errors
///
/// Returns an error if the server fails while running.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let records = state.records.clone();
    let app = router(state);

    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "recordkv listening");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped, shutting down record backend");
    if let Err(e) = records.shutdown().await {
        warn!(error = %e, "Record backend did not shut down cleanly");
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
