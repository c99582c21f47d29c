//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use route_mux::config::MuxConfig;
use route_mux::http::HttpServer;
use route_mux::lifecycle::{build_mux, Shutdown};
use route_mux::Mux;

/// Start a server for the given config on an ephemeral port.
///
/// Returns the bound address and the shutdown handle; the server task
/// stops when the handle is dropped after `trigger`.
pub async fn start_server(config: MuxConfig) -> (SocketAddr, Shutdown) {
    let mux = Arc::new(build_mux(&config).expect("config should build"));
    start_server_with_mux(config, mux).await
}

/// Start a server for a pre-built mux on an ephemeral port.
pub async fn start_server_with_mux(config: MuxConfig, mux: Arc<Mux>) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, mux);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// A client that does not pool connections across tests.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
