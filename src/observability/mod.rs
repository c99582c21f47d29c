//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatch path produces:
//!     → tracing events (structured, carry the request ID)
//!     → metrics.rs (request counter, latency histogram)
//!
//! Consumers:
//!     → Log aggregation (stdout via tracing-subscriber)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging via the tracing crate, initialized in the binary
//! - Request ID flows through all log lines of a request
//! - Metrics are cheap (recorder-side aggregation)

pub mod metrics;
