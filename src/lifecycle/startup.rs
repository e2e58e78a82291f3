//! Startup orchestration.
//!
//! # Responsibilities
//! - Pick the store implementation from the configured URL
//! - Connect eagerly, log failure, fall back to `DisconnectedStore`
//! - Wrap the chosen store with the per-call timeout

use std::sync::Arc;
use std::time::Duration;

use crate::config::StoreConfig;
use crate::resilience::TimedStore;
use crate::store::{DisconnectedStore, MemoryStore, PersonStore, SqliteStore};

/// Connect to the configured store. Never fails: an unreachable or missing
/// store yields a `DisconnectedStore` so the process keeps serving.
pub async fn connect_store(config: &StoreConfig) -> Arc<dyn PersonStore> {
    let limit = Duration::from_millis(config.timeout_ms);

    let Some(url) = config.url.as_deref() else {
        tracing::warn!("No store URL configured (set DATABASE_URL); persistence routes will fail");
        return Arc::new(DisconnectedStore::new("no store configured"));
    };

    tracing::info!(url = %url, "Connecting to store");

    if url.starts_with("memory:") {
        tracing::info!("Using in-memory store");
        return Arc::new(TimedStore::new(MemoryStore::new(), limit));
    }

    match tokio::time::timeout(limit, SqliteStore::connect(url)).await {
        Ok(Ok(store)) => {
            tracing::info!("Connected to store");
            Arc::new(TimedStore::new(store, limit))
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Error connecting to store");
            Arc::new(DisconnectedStore::new(e.to_string()))
        }
        Err(_) => {
            tracing::error!(limit = ?limit, "Timed out connecting to store");
            Arc::new(DisconnectedStore::new("connection timed out"))
        }
    }
}
