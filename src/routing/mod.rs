//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration:
//!     expression ("/users/:id")
//!         → expression.rs (compile into segments)
//!         → router.rs (store: exact map or ordered pattern list)
//!
//! Lookup:
//!     Incoming request path
//!         → router.rs (exact map, then ordered pattern scan)
//!         → Return: handler or explicit no-match
//! ```
//!
//! # Design Decisions
//! - The engine sits behind the `Router` trait so the mux layer can be
//!   tested against a stub and the algorithm swapped wholesale
//! - No regex in the hot path (segment matching only)
//! - First match wins (exact before patterns, patterns in registration
//!   order)

pub mod expression;
pub mod matcher;
pub mod router;

pub use matcher::{RouteError, Router};
pub use router::PathRouter;
