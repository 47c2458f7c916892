//! OWASP BLT API worker.
//!
//! Hosts the dispatcher behind an HTTP listener, standing in for the edge
//! runtime that delivers requests in production.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server ──▶ dispatch::Dispatcher
//!                     (request ID,        │
//!                      tracing,           ├─ OPTIONS ─────────▶ 204 preflight
//!                      body buffer)       │
//!                                         ├─ routing::Router ─▶ handlers::*
//!                                         │                      (stats, bugs,
//!                                         │                       leaderboard, auth)
//!                                         │
//!                                         └─ failures ────────▶ error::ApiError
//!                                                                 → JSON envelope
//!     Client Response
//!     ◀────────────── Envelope + security::origin CORS headers
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use blt_worker::config::{self, WorkerConfig};
use blt_worker::observability::{logging, metrics};
use blt_worker::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "blt-worker")]
#[command(about = "OWASP BLT API worker", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "BLT_WORKER_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => WorkerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        config::validation::validate_config(&config).map_err(config::ConfigError::Validation)?;
    }

    logging::init(&config.observability)?;

    tracing::info!("blt-worker v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_body_bytes = config.limits.max_body_bytes,
        config_file = ?cli.config,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        if let Err(e) = metrics::init_metrics(addr) {
            tracing::error!(error = %e, "Failed to start metrics exporter");
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
