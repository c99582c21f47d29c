//! OS signal handling.
//!
//! # Responsibilities
//! - Register the Ctrl+C handler
//! - Translate the signal into the internal shutdown event
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Signals only trigger the broadcast; the serving task owns the
//!   actual drain

use crate::lifecycle::shutdown::Shutdown;

/// Wait for Ctrl+C and trigger the shutdown broadcast.
pub async fn shutdown_on_ctrl_c(shutdown: Shutdown) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
    shutdown.trigger();
}
