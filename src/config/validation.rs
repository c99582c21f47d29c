//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate route expressions against the engine's grammar
//! - Detect duplicate route expressions
//! - Validate value ranges (status codes, timeouts, addresses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MuxConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::MuxConfig;
use crate::routing::expression;

/// A single semantic problem found in a configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("route {index}: invalid expression {expr:?}")]
    InvalidExpression { index: usize, expr: String },

    #[error("route {index}: duplicate expression {expr:?}")]
    DuplicateExpression { index: usize, expr: String },

    #[error("route {index}: invalid status code {status}")]
    InvalidStatus { index: usize, status: u16 },

    #[error("alias {index}: empty match string")]
    EmptyAliasMatch { index: usize },

    #[error("listener: invalid bind address {addr:?}")]
    InvalidBindAddress { addr: String },

    #[error("timeouts: request_secs must be greater than zero")]
    ZeroRequestTimeout,
}

/// Check a parsed configuration for semantic problems, collecting every
/// error rather than stopping at the first.
pub fn validate_config(config: &MuxConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress {
            addr: config.listener.bind_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    for (index, alias) in config.aliases.iter().enumerate() {
        if alias.from.is_empty() {
            errors.push(ValidationError::EmptyAliasMatch { index });
        }
    }

    let mut seen = HashSet::new();
    for (index, route) in config.routes.iter().enumerate() {
        if !expression::is_valid(&route.expression) {
            errors.push(ValidationError::InvalidExpression {
                index,
                expr: route.expression.clone(),
            });
        }
        if !seen.insert(route.expression.as_str()) {
            errors.push(ValidationError::DuplicateExpression {
                index,
                expr: route.expression.clone(),
            });
        }
        if !(100..=599).contains(&route.status) {
            errors.push(ValidationError::InvalidStatus {
                index,
                status: route.status,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
