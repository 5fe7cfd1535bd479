//! recordkv server binary.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::{info, warn};

use recordkv::config::Config;
use recordkv::server::{self, AppState};

/// Record queries and an in-memory key-value store over HTTP.
#[derive(Debug, Parser)]
#[command(name = "recordkv", version, about)]
struct Cli {
    /// Path to a TOML config file (default: ./recordkv.toml if present)
    #[arg(short, long, env = "RECORDKV_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config and PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is not an error.
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let validation = config.validate()?;
    for warning in &validation.warnings {
        warn!("{warning}");
    }

    let metrics = server::metrics::install_recorder()?;
    let state = AppState::from_config(&config).await?.with_metrics(metrics);

    let address = config.server.address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!(
        backend = ?config.records.backend,
        database = %config.records.database,
        collection = %config.records.collection,
        "Starting recordkv"
    );
    server::serve(listener, state).await
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` overrides the default `info` filter.
fn init_tracing(format: LogFormat) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
    }
}
