//! Alias-aware dispatch facade.
//!
//! # Data Flow
//! ```text
//! Configuration:
//!     add_alias("v1", "v2")
//!     handle("/api/v1/users", H)
//!         → engine registers /api/v1/users
//!         → alias table rewrites → engine registers /api/v2/users
//!
//! Dispatch:
//!     request → engine lookup
//!         → handler found: invoke it
//!         → no match or engine error: invoke not-found responder
//! ```
//!
//! # Design Decisions
//! - Alias-derived registrations are a convenience projection, not a
//!   second source of truth: when the alias-stage mutation fails after
//!   the primary succeeded, the primary stays committed and the error
//!   is wrapped with alias-stage context (no rollback)
//! - Dispatch exposes a binary outcome only; engine errors and no-match
//!   both take the not-found path
//! - The mux is configured before serving; mutations take `&mut self`
//!   and the facade adds no locking of its own

pub mod alias;
pub mod not_found;

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use thiserror::Error;

use crate::http::handler::{Handler, ResponseWriter};
use crate::routing::{PathRouter, RouteError, Router};

pub use alias::AliasTable;
pub use not_found::NotFound;

/// Errors surfaced by mux operations.
#[derive(Debug, Error)]
pub enum MuxError {
    /// The engine rejected the primary registration or removal;
    /// propagated verbatim, no alias-stage work was attempted.
    #[error(transparent)]
    Matcher(#[from] RouteError),

    /// The alias-derived registration failed after the primary one
    /// succeeded. The primary registration remains in effect.
    #[error("while adding alias handler: {0}")]
    AliasRegistration(#[source] RouteError),

    /// The alias-derived removal failed after the primary one
    /// succeeded. The primary removal remains in effect.
    #[error("while removing alias handler: {0}")]
    AliasRemoval(#[source] RouteError),

    /// Attempt to clear the not-found responder.
    #[error("not found handler cannot be empty: operation rejected")]
    NotFoundRequired,
}

/// Request-dispatch facade in front of a route-matching engine.
///
/// Registered alias rules make every route registration effective under
/// its rewritten expression as well; unmatched requests fall through to
/// a replaceable not-found responder.
pub struct Mux {
    not_found: Arc<dyn Handler>,
    router: Box<dyn Router>,
    aliases: AliasTable,
}

impl Mux {
    /// A mux over the default [`PathRouter`] engine.
    pub fn new() -> Self {
        Self::with_router(Box::new(PathRouter::new()))
    }

    /// A mux over a caller-supplied engine.
    pub fn with_router(router: Box<dyn Router>) -> Self {
        Self {
            not_found: Arc::new(NotFound),
            router,
            aliases: AliasTable::new(),
        }
    }

    /// Add an alias for route expressions. If `from` matches any part of
    /// an expression registered via [`Mux::handle`], the registration is
    /// duplicated under the expression with `from` replaced by `to`.
    pub fn add_alias(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.aliases.add(from, to);
    }

    /// Bulk-load many expression→handler registrations in a single call
    /// into the engine, so startup does not pay per-route registration
    /// cost.
    ///
    /// With aliases configured, each entry whose expression rewrites to
    /// a different string contributes both the original and the rewritten
    /// key to the flat map handed to the engine. Alias-derived keys never
    /// error on collision; the last write into the map wins.
    pub fn init_handlers(
        &mut self,
        handlers: HashMap<String, Arc<dyn Handler>>,
    ) -> Result<(), MuxError> {
        if self.aliases.is_empty() {
            return self.router.init_routes(handlers).map_err(MuxError::from);
        }

        let mut modified: HashMap<String, Arc<dyn Handler>> =
            HashMap::with_capacity(handlers.len());
        for (expr, handler) in handlers {
            let (aliased, changed) = self.aliases.apply(&expr);
            if changed {
                modified.insert(aliased.into_owned(), handler.clone());
            }
            modified.insert(expr, handler);
        }
        self.router.init_routes(modified).map_err(MuxError::from)
    }

    /// Register a handler for a route expression, and for its aliased
    /// form when an alias rule rewrites it.
    pub fn handle(&mut self, expr: &str, handler: Arc<dyn Handler>) -> Result<(), MuxError> {
        self.router.upsert_route(expr, handler.clone())?;

        let (aliased, changed) = self.aliases.apply(expr);
        if changed {
            self.router
                .upsert_route(&aliased, handler)
                .map_err(MuxError::AliasRegistration)?;
        }
        Ok(())
    }

    /// Register a closure for a route expression. Sugar over
    /// [`Mux::handle`].
    pub fn handle_func<F>(&mut self, expr: &str, f: F) -> Result<(), MuxError>
    where
        F: Fn(&Request<Body>, &mut ResponseWriter) + Send + Sync + 'static,
    {
        self.handle(expr, Arc::new(f))
    }

    /// Remove a registration, and its alias-derived duplicate when an
    /// alias rule rewrites the expression. A failed primary removal
    /// returns immediately without touching the alias-derived entry.
    pub fn remove(&mut self, expr: &str) -> Result<(), MuxError> {
        self.router.remove_route(expr)?;

        let (aliased, changed) = self.aliases.apply(expr);
        if changed {
            self.router
                .remove_route(&aliased)
                .map_err(MuxError::AliasRemoval)?;
        }
        Ok(())
    }

    /// Route the request and invoke its handler. Unmatched requests and
    /// engine errors both produce the not-found response; dispatch never
    /// fails.
    pub fn serve(&self, req: &Request<Body>, w: &mut ResponseWriter) {
        match self.router.route(req) {
            Ok(Some(handler)) => handler.serve(req, w),
            Ok(None) => {
                tracing::debug!(path = %req.uri().path(), "No route matched");
                self.not_found.serve(req, w);
            }
            Err(e) => {
                tracing::warn!(path = %req.uri().path(), error = %e, "Engine failed to route, serving not-found");
                self.not_found.serve(req, w);
            }
        }
    }

    /// Replace the not-found responder. `None` is rejected so the mux is
    /// never left without a fallback.
    pub fn set_not_found(&mut self, handler: Option<Arc<dyn Handler>>) -> Result<(), MuxError> {
        match handler {
            Some(h) => {
                self.not_found = h;
                Ok(())
            }
            None => Err(MuxError::NotFoundRequired),
        }
    }

    /// The currently active not-found responder.
    pub fn get_not_found(&self) -> Arc<dyn Handler> {
        self.not_found.clone()
    }

    /// Whether the engine would accept this expression. Pure
    /// passthrough; the mux adds no validation of its own.
    pub fn is_valid(&self, expr: &str) -> bool {
        self.router.is_valid(expr)
    }
}

impl Default for Mux {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    use axum::http::{header, StatusCode};

    /// Engine stub that records every call and can be primed to fail.
    #[derive(Default)]
    struct StubState {
        upserts: Vec<String>,
        removals: Vec<String>,
        init_batches: Vec<Vec<String>>,
        fail_upsert: HashSet<String>,
        fail_remove: HashSet<String>,
        route_error: bool,
    }

    #[derive(Default)]
    struct StubRouter {
        state: Arc<Mutex<StubState>>,
        routes: Mutex<HashMap<String, Arc<dyn Handler>>>,
    }

    impl StubRouter {
        fn with_state(state: Arc<Mutex<StubState>>) -> Self {
            Self {
                state,
                routes: Mutex::new(HashMap::new()),
            }
        }
    }

    impl Router for StubRouter {
        fn init_routes(
            &mut self,
            routes: HashMap<String, Arc<dyn Handler>>,
        ) -> Result<(), RouteError> {
            let mut keys: Vec<String> = routes.keys().cloned().collect();
            keys.sort();
            self.state.lock().unwrap().init_batches.push(keys);
            self.routes.lock().unwrap().extend(routes);
            Ok(())
        }

        fn upsert_route(&mut self, expr: &str, handler: Arc<dyn Handler>) -> Result<(), RouteError> {
            let mut state = self.state.lock().unwrap();
            if state.fail_upsert.contains(expr) {
                return Err(RouteError::InvalidExpression {
                    expr: expr.to_string(),
                    reason: "stub rejection".to_string(),
                });
            }
            state.upserts.push(expr.to_string());
            self.routes.lock().unwrap().insert(expr.to_string(), handler);
            Ok(())
        }

        fn remove_route(&mut self, expr: &str) -> Result<(), RouteError> {
            let mut state = self.state.lock().unwrap();
            if state.fail_remove.contains(expr) {
                return Err(RouteError::NotRegistered(expr.to_string()));
            }
            state.removals.push(expr.to_string());
            self.routes.lock().unwrap().remove(expr);
            Ok(())
        }

        fn route(&self, req: &Request<Body>) -> Result<Option<Arc<dyn Handler>>, RouteError> {
            if self.state.lock().unwrap().route_error {
                return Err(RouteError::NotRegistered("boom".to_string()));
            }
            Ok(self.routes.lock().unwrap().get(req.uri().path()).cloned())
        }

        fn is_valid(&self, expr: &str) -> bool {
            expr.starts_with('/')
        }
    }

    fn stub_mux() -> (Mux, Arc<Mutex<StubState>>) {
        let state = Arc::new(Mutex::new(StubState::default()));
        let mux = Mux::with_router(Box::new(StubRouter::with_state(state.clone())));
        (mux, state)
    }

    fn ok_handler(tag: &'static str) -> Arc<dyn Handler> {
        Arc::new(move |_req: &Request<Body>, w: &mut ResponseWriter| {
            w.write_str(tag);
        })
    }

    fn request(path: &str) -> Request<Body> {
        Request::builder().uri(path).body(Body::empty()).unwrap()
    }

    #[test]
    fn test_handle_registers_primary_and_alias() {
        let (mut mux, state) = stub_mux();
        mux.add_alias("v1", "v2");
        mux.handle("/v1/x", ok_handler("h")).unwrap();

        let state = state.lock().unwrap();
        assert_eq!(state.upserts, vec!["/v1/x", "/v2/x"]);
    }

    #[test]
    fn test_handle_without_alias_registers_once() {
        let (mut mux, state) = stub_mux();
        mux.add_alias("v1", "v2");
        mux.handle("/v3/x", ok_handler("h")).unwrap();

        assert_eq!(state.lock().unwrap().upserts, vec!["/v3/x"]);
    }

    #[test]
    fn test_rejected_primary_skips_alias() {
        let (mut mux, state) = stub_mux();
        mux.add_alias("v1", "v2");
        state
            .lock()
            .unwrap()
            .fail_upsert
            .insert("/v1/x".to_string());

        let err = mux.handle("/v1/x", ok_handler("h")).unwrap_err();
        assert!(matches!(err, MuxError::Matcher(_)));
        assert!(state.lock().unwrap().upserts.is_empty());
    }

    #[test]
    fn test_alias_stage_failure_keeps_primary() {
        let (mut mux, state) = stub_mux();
        mux.add_alias("v1", "v2");
        state
            .lock()
            .unwrap()
            .fail_upsert
            .insert("/v2/x".to_string());

        let err = mux.handle("/v1/x", ok_handler("h")).unwrap_err();
        assert!(matches!(err, MuxError::AliasRegistration(_)));
        assert!(err.to_string().starts_with("while adding alias handler:"));
        // Primary registration stays committed.
        assert_eq!(state.lock().unwrap().upserts, vec!["/v1/x"]);
    }

    #[test]
    fn test_remove_removes_both() {
        let (mut mux, state) = stub_mux();
        mux.add_alias("v1", "v2");
        mux.handle("/v1/x", ok_handler("h")).unwrap();
        mux.remove("/v1/x").unwrap();

        assert_eq!(state.lock().unwrap().removals, vec!["/v1/x", "/v2/x"]);
    }

    #[test]
    fn test_failed_primary_removal_skips_alias() {
        let (mut mux, state) = stub_mux();
        mux.add_alias("v1", "v2");
        state
            .lock()
            .unwrap()
            .fail_remove
            .insert("/v1/x".to_string());

        let err = mux.remove("/v1/x").unwrap_err();
        assert!(matches!(err, MuxError::Matcher(_)));
        assert!(state.lock().unwrap().removals.is_empty());
    }

    #[test]
    fn test_alias_removal_failure_is_wrapped() {
        let (mut mux, state) = stub_mux();
        mux.add_alias("v1", "v2");
        mux.handle("/v1/x", ok_handler("h")).unwrap();
        state
            .lock()
            .unwrap()
            .fail_remove
            .insert("/v2/x".to_string());

        let err = mux.remove("/v1/x").unwrap_err();
        assert!(matches!(err, MuxError::AliasRemoval(_)));
        // Primary removal already happened.
        assert_eq!(state.lock().unwrap().removals, vec!["/v1/x"]);
    }

    #[test]
    fn test_init_handlers_without_aliases_passes_map_verbatim() {
        let (mut mux, state) = stub_mux();
        let mut handlers: HashMap<String, Arc<dyn Handler>> = HashMap::new();
        handlers.insert("/a".to_string(), ok_handler("a"));
        handlers.insert("/b".to_string(), ok_handler("b"));
        handlers.insert("/c".to_string(), ok_handler("c"));
        mux.init_handlers(handlers).unwrap();

        let state = state.lock().unwrap();
        assert_eq!(state.init_batches, vec![vec!["/a", "/b", "/c"]]);
    }

    #[test]
    fn test_init_handlers_adds_alias_derived_keys() {
        let (mut mux, state) = stub_mux();
        mux.add_alias("v1", "v2");
        let mut handlers: HashMap<String, Arc<dyn Handler>> = HashMap::new();
        handlers.insert("/v1/x".to_string(), ok_handler("x"));
        handlers.insert("/other".to_string(), ok_handler("o"));
        mux.init_handlers(handlers).unwrap();

        let state = state.lock().unwrap();
        assert_eq!(state.init_batches, vec![vec!["/other", "/v1/x", "/v2/x"]]);
    }

    #[test]
    fn test_init_handlers_alias_collision_yields_single_key() {
        let (mut mux, state) = stub_mux();
        mux.add_alias("v1", "v2");
        // "/v1/x" rewrites to "/v2/x", colliding with the explicit key.
        let mut handlers: HashMap<String, Arc<dyn Handler>> = HashMap::new();
        handlers.insert("/v1/x".to_string(), ok_handler("old"));
        handlers.insert("/v2/x".to_string(), ok_handler("new"));
        mux.init_handlers(handlers).unwrap();

        // Exactly one registration per key; the colliding key was
        // silently overwritten per map insertion order, never an error.
        let state = state.lock().unwrap();
        assert_eq!(state.init_batches, vec![vec!["/v1/x", "/v2/x"]]);
    }

    #[test]
    fn test_serve_invokes_matched_handler() {
        let (mut mux, _state) = stub_mux();
        mux.handle("/hit", ok_handler("hit-body")).unwrap();

        let mut w = ResponseWriter::new();
        mux.serve(&request("/hit"), &mut w);
        assert_eq!(w.status(), StatusCode::OK);
        assert_eq!(w.body(), b"hit-body");
    }

    #[test]
    fn test_serve_unmatched_uses_not_found() {
        let (mux, _state) = stub_mux();

        let mut w = ResponseWriter::new();
        mux.serve(&request("/nope"), &mut w);
        assert_eq!(w.status(), StatusCode::NOT_FOUND);
        assert_eq!(w.headers().get(header::CONTENT_TYPE).unwrap(), "text/plain");
        assert_eq!(w.body(), b"Not Found");
    }

    #[test]
    fn test_serve_engine_error_uses_not_found() {
        let (mut mux, state) = stub_mux();
        mux.handle("/hit", ok_handler("hit-body")).unwrap();
        state.lock().unwrap().route_error = true;

        let mut w = ResponseWriter::new();
        mux.serve(&request("/hit"), &mut w);
        assert_eq!(w.status(), StatusCode::NOT_FOUND);
        assert_eq!(w.body(), b"Not Found");
    }

    #[test]
    fn test_set_not_found_none_rejected() {
        let (mut mux, _state) = stub_mux();
        mux.set_not_found(Some(ok_handler("custom"))).unwrap();

        let err = mux.set_not_found(None).unwrap_err();
        assert!(matches!(err, MuxError::NotFoundRequired));

        // Previous responder stays active.
        let mut w = ResponseWriter::new();
        mux.serve(&request("/nope"), &mut w);
        assert_eq!(w.body(), b"custom");
    }

    #[test]
    fn test_get_not_found_returns_replacement() {
        let (mut mux, _state) = stub_mux();
        let replacement = ok_handler("replacement");
        mux.set_not_found(Some(replacement.clone())).unwrap();

        let active = mux.get_not_found();
        assert!(Arc::ptr_eq(&active, &replacement));
    }

    #[test]
    fn test_is_valid_passthrough() {
        let (mux, _state) = stub_mux();
        assert!(mux.is_valid("/anything"));
        assert!(!mux.is_valid("anything"));
    }

    #[test]
    fn test_end_to_end_with_default_engine() {
        // The full facade over the real PathRouter.
        let mut mux = Mux::new();
        mux.add_alias("v1", "v2");
        mux.handle("/api/v1/users", ok_handler("users")).unwrap();

        for path in ["/api/v1/users", "/api/v2/users"] {
            let mut w = ResponseWriter::new();
            mux.serve(&request(path), &mut w);
            assert_eq!(w.body(), b"users", "path {path} should route");
        }

        mux.remove("/api/v1/users").unwrap();
        for path in ["/api/v1/users", "/api/v2/users"] {
            let mut w = ResponseWriter::new();
            mux.serve(&request(path), &mut w);
            assert_eq!(w.status(), StatusCode::NOT_FOUND, "path {path} should be gone");
        }
    }
}
