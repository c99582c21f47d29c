//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define mux metrics (request counts, latency)
//! - Expose a Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `mux_requests_total` (counter): total requests by method, status
//! - `mux_request_duration_seconds` (histogram): latency distribution by
//!   method
//!
//! # Design Decisions
//! - Low-overhead metric updates (recorder handles aggregation)
//! - Status label carries the final dispatch outcome, so not-found
//!   fallbacks show up as 404s

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on the given address.
///
/// Failure to install is logged, not fatal: the mux serves without
/// metrics.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one dispatched request.
pub fn record_request(method: &str, status: u16, start_time: Instant) {
    metrics::counter!(
        "mux_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "mux_request_duration_seconds",
        "method" => method.to_string()
    )
    .record(start_time.elapsed().as_secs_f64());
}
