//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace, timeout)
//!     → middleware/current_endpoint.rs (resolve request, attach endpoint name)
//!     → handlers.rs (endpoint API or site fallback)
//!     → JSON response
//! ```

pub mod handlers;
pub mod middleware;
pub mod server;

pub use server::{build_router, AppState, HttpServer};
