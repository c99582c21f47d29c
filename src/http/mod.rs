//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (stamp request ID)
//!     → [mux resolves handler or not-found]
//!     → handler.rs (buffered ResponseWriter → Axum response)
//!     → Send to client
//! ```

pub mod handler;
pub mod request;
pub mod server;

pub use handler::{Handler, ResponseWriter, StaticResponse};
pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
