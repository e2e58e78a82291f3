//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use phonebook::config::PhonebookConfig;
use phonebook::http::HttpServer;
use phonebook::lifecycle::Shutdown;
use phonebook::store::{MemoryStore, PersonStore};

/// A running server on an ephemeral port.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the service over an empty in-memory store.
#[allow(dead_code)]
pub async fn spawn_app() -> TestApp {
    spawn_app_with_store(Arc::new(MemoryStore::new())).await
}

/// Start the service over the given store.
pub async fn spawn_app_with_store(store: Arc<dyn PersonStore>) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = PhonebookConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.listener.port = Some(addr.port());

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, store);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap();

    TestApp { addr, client, shutdown }
}
