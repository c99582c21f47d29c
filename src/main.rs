//! Alias-aware routing mux server.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                  MUX SERVER                  │
//!                    │                                              │
//!   Client Request   │  ┌─────────┐    ┌─────────┐    ┌──────────┐  │
//!   ─────────────────┼─▶│  http   │───▶│   mux   │───▶│ routing  │  │
//!                    │  │ server  │    │ facade  │    │  engine  │  │
//!                    │  └─────────┘    └────┬────┘    └────┬─────┘  │
//!                    │                      │              │        │
//!                    │              no match│       matched│        │
//!                    │                      ▼              ▼        │
//!   Client Response  │               ┌───────────┐  ┌───────────┐   │
//!   ◀────────────────┼───────────────│ not-found │  │  handler  │   │
//!                    │               │ responder │  │           │   │
//!                    │               └───────────┘  └───────────┘   │
//!                    │                                              │
//!                    │  ┌────────────────────────────────────────┐  │
//!                    │  │         Cross-Cutting Concerns         │  │
//!                    │  │  config · lifecycle · observability    │  │
//!                    │  └────────────────────────────────────────┘  │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use route_mux::config::{load_config, MuxConfig};
use route_mux::http::HttpServer;
use route_mux::lifecycle::{build_mux, Shutdown};
use route_mux::observability::metrics;

#[derive(Parser, Debug)]
#[command(name = "route-mux", about = "Alias-aware routing mux server")]
struct Args {
    /// Path to the TOML configuration file. Defaults are used when
    /// omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "route_mux=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("route-mux v0.1.0 starting");

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => MuxConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        aliases = config.aliases.len(),
        routes = config.routes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Metrics exporter
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Build the mux (aliases first, then bulk route registration)
    let mux = Arc::new(build_mux(&config)?);

    // Translate Ctrl+C into the shutdown broadcast
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(route_mux::lifecycle::signals::shutdown_on_ctrl_c(shutdown));

    let server = HttpServer::new(config, mux);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
