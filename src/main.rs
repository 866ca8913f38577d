//! Product showcase server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser / CLI
//!          │
//!          ▼
//!   ┌──────────────────────────────────────────────┐
//!   │ security headers → request id → trace →      │
//!   │ timeout → body limit → metrics               │
//!   └──────────────────────┬───────────────────────┘
//!                          │
//!        ┌─────────────────┼──────────────────┐
//!        ▼                 ▼                  ▼
//!   GET /api/products   /api/admin/*     POST/PUT/DELETE
//!   (public)            login/logout     /api/products
//!        │                 │             (session check)
//!        │                 ▼                  │
//!        │          sessions + login          │
//!        │          rate limiter              │
//!        ▼                                    ▼
//!   ┌──────────────────────────────────────────────┐
//!   │ validator → ProductStore (SQLite, one lock)  │
//!   └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use showcase::config::{load_config, load_from_env, validate_config, ConfigError};
use showcase::http::HttpServer;
use showcase::lifecycle::{build_state, wait_for_shutdown_signal, Shutdown};
use showcase::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "showcase")]
#[command(about = "Product showcase server with an admin API", long_about = None)]
struct Args {
    /// TOML config file. Without one, defaults plus environment are used.
    #[arg(short, long, env = "SHOWCASE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => load_from_env()?,
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability.log_filter);
    tracing::info!("showcase v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        database = %config.database.path,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let bind_address = config.listener.bind_address.clone();
    let state = build_state(config)?;

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        shutdown.trigger();
    });

    HttpServer::new(state).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
