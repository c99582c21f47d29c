//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Register aliases → Bulk-register routes
//!     → Start listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain in-flight → Exit
//!
//! Signals (signals.rs):
//!     Ctrl+C → Trigger graceful shutdown broadcast
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then the mux, then the listener
//! - Aliases registered before routes, so every registration sees the
//!   full alias table

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::build_mux;
