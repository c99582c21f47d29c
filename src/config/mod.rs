//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → MuxConfig (validated, immutable)
//!     → lifecycle::startup builds the mux from it
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; aliases and routes registered at
//!   runtime go through the mux API, not the config
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AliasConfig, ListenerConfig, MuxConfig, ObservabilityConfig, StaticRouteConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
