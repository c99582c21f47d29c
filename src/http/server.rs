//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router that funnels every path into the mux
//! - Wire up middleware (timeout, request ID, tracing)
//! - Bind server to listener, serve until shutdown
//! - Record per-request metrics
//!
//! # Design Decisions
//! - The mux is configured before the server starts and shared
//!   read-only via `Arc`; the serving path never mutates it
//! - Dispatch never fails: the mux resolves everything to a response,
//!   matched or not-found

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::MuxConfig;
use crate::http::handler::ResponseWriter;
use crate::http::request::{RequestIdLayer, X_REQUEST_ID};
use crate::mux::Mux;
use crate::observability::metrics;

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub mux: Arc<Mux>,
}

/// HTTP server wrapping a fully configured mux.
pub struct HttpServer {
    router: Router,
    config: MuxConfig,
}

impl HttpServer {
    /// Create a new HTTP server serving the given mux.
    pub fn new(config: MuxConfig, mux: Arc<Mux>) -> Self {
        let state = AppState { mux };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &MuxConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &MuxConfig {
        &self.config
    }
}

/// Main dispatch handler: hands every request to the mux and converts
/// the buffered response back to Axum.
async fn dispatch_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Response<Body> {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let mut writer = ResponseWriter::new();
    state.mux.serve(&request, &mut writer);
    let response = writer.into_response();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status = %response.status(),
        "Dispatched request"
    );
    metrics::record_request(&method, response.status().as_u16(), start_time);

    response
}
