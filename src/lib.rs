//! Alias-aware HTTP routing mux.
//!
//! A request-dispatch facade in front of a route-matching engine:
//! operators register string-substitution aliases so that a single route
//! registration is simultaneously effective under its rewritten
//! expressions, and unmatched requests fall through to a replaceable
//! not-found responder.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod mux;
pub mod observability;
pub mod routing;

pub use config::MuxConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use mux::{Mux, MuxError};
pub use routing::{PathRouter, RouteError, Router};
