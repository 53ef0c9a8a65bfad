//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::sync::Arc;

use book_service::config::ServiceConfig;
use book_service::http::HttpServer;
use book_service::lifecycle::Shutdown;
use book_service::store::{BookStore, InMemoryBookStore};

/// A book service bound to an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a service over a fresh in-memory store.
#[allow(dead_code)]
pub async fn start_server() -> TestServer {
    start_server_with(Arc::new(InMemoryBookStore::new())).await
}

/// Start a service over the given store.
#[allow(dead_code)]
pub async fn start_server_with(store: Arc<dyn BookStore>) -> TestServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(ServiceConfig::default(), store).unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer { addr, shutdown }
}

/// HTTP client that never reuses pooled connections across tests.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
