//! Phonebook service.
//!
//! A small REST API over a collection of contacts (name, number).
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ request id ─▶ trace ─▶ cors/timeout/limit ─▶ request log
//!                                                                      │
//!                                                                      ▼
//!                                                               ┌─────────────┐
//!                                                               │   router    │
//!                                                               └──────┬──────┘
//!                                                                      ▼
//!     Client Response                ┌─────────────┐            ┌─────────────┐
//!     ◀──────────────────────────────│ error.rs    │◀── Err ────│  handlers   │
//!                                    │ translator  │            └──────┬──────┘
//!                                    └─────────────┘                   ▼
//!                                                               ┌─────────────┐
//!                                                               │ TimedStore  │
//!                                                               │ → sqlite /  │
//!                                                               │   memory    │
//!                                                               └─────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use phonebook::config::{self, loader::ENV_CONFIG_PATH};
use phonebook::http::HttpServer;
use phonebook::lifecycle::{connect_store, signals, Shutdown};
use phonebook::observability::init_tracing;

#[derive(Parser)]
#[command(name = "phonebook")]
#[command(about = "Phonebook REST service", long_about = None)]
struct Args {
    /// Optional TOML configuration file.
    #[arg(short, long, env = ENV_CONFIG_PATH)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let config = match config::load_from_env(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_tracing("info");
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    init_tracing(&config.observability.log_level);
    tracing::info!("phonebook v{} starting", env!("CARGO_PKG_VERSION"));

    let Some(bind_address) = config.listener.bind_address() else {
        return Err("listener address is not set".into());
    };

    tracing::info!(
        bind_address = %bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        store_timeout_ms = config.store.timeout_ms,
        "Configuration loaded"
    );

    let store = connect_store(&config.store).await;

    let listener = TcpListener::bind(bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Server running");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config, store);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
