//! Route-matching engine contract.
//!
//! # Responsibilities
//! - Define the operations a matching engine must expose
//! - Define the errors an engine may report
//!
//! # Design Decisions
//! - Trait-object seam: the mux never depends on a concrete engine, so
//!   the matching algorithm (trie, list scan, regex) can be swapped or
//!   stubbed in tests without touching dispatch logic
//! - Handlers are opaque to the engine: stored and returned, never
//!   inspected beyond invocation
//! - `route` returns an explicit no-match (`Ok(None)`) rather than a
//!   silent default

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use thiserror::Error;

use crate::http::handler::Handler;

/// Errors reported by a route-matching engine.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The expression is malformed and cannot be compiled.
    #[error("invalid route expression {expr:?}: {reason}")]
    InvalidExpression { expr: String, reason: String },

    /// Removal of an expression that was never registered.
    #[error("no route registered for expression {0:?}")]
    NotRegistered(String),
}

/// A route-matching engine: stores expression→handler registrations and
/// resolves incoming requests to a handler.
pub trait Router: Send + Sync {
    /// Bulk-load many registrations in one call. A reported failure
    /// aborts the whole batch.
    fn init_routes(&mut self, routes: HashMap<String, Arc<dyn Handler>>) -> Result<(), RouteError>;

    /// Register a handler for an expression, replacing any existing
    /// registration for the same expression.
    fn upsert_route(&mut self, expr: &str, handler: Arc<dyn Handler>) -> Result<(), RouteError>;

    /// Remove the registration for an expression.
    fn remove_route(&mut self, expr: &str) -> Result<(), RouteError>;

    /// Resolve a request to its registered handler, or `None` when no
    /// registration matches.
    fn route(&self, req: &Request<Body>) -> Result<Option<Arc<dyn Handler>>, RouteError>;

    /// Whether the engine would accept this expression.
    fn is_valid(&self, expr: &str) -> bool;
}
