//! Book Service
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ───────────────▶ request id ─▶ trace ─▶ cors ─▶ router ─▶ handler
//!                                                                 │
//!                                                                 ▼
//!                                                        Arc<dyn BookStore>
//!                                                                 │
//!     Client Response                                             ▼
//!     ◀─────────────── JSON ◀──────────────────────────── MongoDB collection
//! ```
//!
//! Startup order: CLI → config → logging → datastore (fatal on failure)
//! → metrics → listener.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use book_service::config::{load_config, validate_config, ConfigError, ServiceConfig};
use book_service::lifecycle::{open_store, shutdown_signal, Shutdown};
use book_service::observability::{init_logging, init_metrics};
use book_service::HttpServer;

#[derive(Parser)]
#[command(name = "book-service", version)]
#[command(about = "HTTP CRUD service for a MongoDB book collection", long_about = None)]
struct Args {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, env = "BOOKS_CONFIG")]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(long)]
    bind: Option<String>,

    /// Override `datastore.uri`.
    #[arg(long, env = "BOOKS_MONGO_URI")]
    mongo_uri: Option<String>,
}

fn resolve_config(args: &Args) -> Result<ServiceConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = &args.bind {
        config.listener.bind_address = bind.clone();
    }
    if let Some(uri) = &args.mongo_uri {
        config.datastore.uri = uri.clone();
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    init_logging(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "book-service starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        backend = ?config.datastore.backend,
        allowed_origin = %config.cors.allowed_origin,
        "Configuration loaded"
    );

    let store = match open_store(&config.datastore).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "Could not connect to the datastore");
            return Err(e.into());
        }
    };

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config, store)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
