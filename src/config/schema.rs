//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the mux
//! server. All types derive Serde traits for deserialization from config
//! files.

use serde::{Deserialize, Serialize};

/// Root configuration for the mux server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MuxConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Alias rules applied to route expressions, in order.
    pub aliases: Vec<AliasConfig>,

    /// Config-declared routes served as static responses.
    pub routes: Vec<StaticRouteConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// One alias rule: occurrences of `match` in a route expression are
/// replaced with `replace`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AliasConfig {
    #[serde(rename = "match")]
    pub from: String,
    #[serde(rename = "replace")]
    pub to: String,
}

/// A route registered at startup, answered with a fixed response.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticRouteConfig {
    /// Route expression (e.g., "/api/v1/users", "/users/:id",
    /// "/static/*").
    pub expression: String,

    /// Response status code.
    pub status: u16,

    /// Response content type.
    pub content_type: String,

    /// Response body.
    pub body: String,
}

impl Default for StaticRouteConfig {
    fn default() -> Self {
        Self {
            expression: String::new(),
            status: 200,
            content_type: "text/plain".to_string(),
            body: String::new(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
