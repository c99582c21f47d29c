//! Default route-matching engine.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Look up matching route for request
//! - Return matched handler or explicit no-match
//!
//! # Design Decisions
//! - O(1) exact-path lookup via HashMap
//! - O(n) ordered scan for parameterized/wildcard routes (acceptable for
//!   typical route counts)
//! - Exact routes win over patterns; among patterns, first registered wins
//! - Deterministic: same input always matches same route

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;

use crate::http::handler::Handler;
use crate::routing::expression::{self, Segment};
use crate::routing::matcher::{RouteError, Router};

struct CompiledRoute {
    expr: String,
    segments: Vec<Segment>,
    handler: Arc<dyn Handler>,
}

/// Segment-based matching engine and the default [`Router`] used by the
/// mux.
#[derive(Default)]
pub struct PathRouter {
    /// Expressions with no params or wildcards, keyed by the expression
    /// itself (which equals the only path it matches).
    exact: HashMap<String, Arc<dyn Handler>>,
    /// Parameterized and wildcard routes, in registration order.
    patterns: Vec<CompiledRoute>,
}

impl PathRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of registrations currently held.
    pub fn len(&self) -> usize {
        self.exact.len() + self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.patterns.is_empty()
    }

    fn insert(&mut self, expr: String, segments: Vec<Segment>, handler: Arc<dyn Handler>) {
        if expression::is_exact(&segments) {
            self.exact.insert(expr, handler);
            return;
        }
        if let Some(existing) = self.patterns.iter_mut().find(|r| r.expr == expr) {
            existing.handler = handler;
        } else {
            self.patterns.push(CompiledRoute {
                expr,
                segments,
                handler,
            });
        }
    }
}

impl Router for PathRouter {
    fn init_routes(&mut self, routes: HashMap<String, Arc<dyn Handler>>) -> Result<(), RouteError> {
        // Compile everything up front so a bad batch leaves the engine
        // untouched.
        let mut compiled = Vec::with_capacity(routes.len());
        for (expr, handler) in routes {
            let segments = expression::compile(&expr)?;
            compiled.push((expr, segments, handler));
        }
        for (expr, segments, handler) in compiled {
            self.insert(expr, segments, handler);
        }
        Ok(())
    }

    fn upsert_route(&mut self, expr: &str, handler: Arc<dyn Handler>) -> Result<(), RouteError> {
        let segments = expression::compile(expr)?;
        self.insert(expr.to_string(), segments, handler);
        Ok(())
    }

    fn remove_route(&mut self, expr: &str) -> Result<(), RouteError> {
        if self.exact.remove(expr).is_some() {
            return Ok(());
        }
        if let Some(pos) = self.patterns.iter().position(|r| r.expr == expr) {
            self.patterns.remove(pos);
            return Ok(());
        }
        Err(RouteError::NotRegistered(expr.to_string()))
    }

    fn route(&self, req: &Request<Body>) -> Result<Option<Arc<dyn Handler>>, RouteError> {
        let path = req.uri().path();
        if let Some(handler) = self.exact.get(path) {
            return Ok(Some(handler.clone()));
        }
        for route in &self.patterns {
            if expression::matches(&route.segments, path) {
                return Ok(Some(route.handler.clone()));
            }
        }
        Ok(None)
    }

    fn is_valid(&self, expr: &str) -> bool {
        expression::is_valid(expr)
    }
}
