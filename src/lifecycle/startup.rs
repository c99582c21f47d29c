//! Startup orchestration.
//!
//! # Responsibilities
//! - Build a fully configured mux from validated configuration
//! - Register aliases before routes, so bulk registration sees them
//!
//! # Design Decisions
//! - Fail fast: any startup registration error is fatal
//! - Bulk registration (`init_handlers`) over per-route calls, so a
//!   large static route set does not pay per-entry registration cost
//! - The mux is complete before the listener starts (no alias or route
//!   mutation while traffic is in flight)

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::StatusCode;

use crate::config::MuxConfig;
use crate::http::handler::{Handler, StaticResponse};
use crate::mux::{Mux, MuxError};

/// Build a mux from configuration: aliases first, then every declared
/// route in one bulk registration.
pub fn build_mux(config: &MuxConfig) -> Result<Mux, MuxError> {
    let mut mux = Mux::new();

    for alias in &config.aliases {
        mux.add_alias(alias.from.clone(), alias.to.clone());
    }

    let mut handlers: HashMap<String, Arc<dyn Handler>> =
        HashMap::with_capacity(config.routes.len());
    for route in &config.routes {
        let status = StatusCode::from_u16(route.status).unwrap_or(StatusCode::OK);
        handlers.insert(
            route.expression.clone(),
            Arc::new(StaticResponse::new(
                status,
                route.content_type.clone(),
                route.body.clone(),
            )),
        );
    }
    mux.init_handlers(handlers)?;

    Ok(mux)
}
