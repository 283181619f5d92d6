//! Request routing: turning an incoming URI into a resolved request context.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, query)
//!     → context.rs (parse query vars, strip home path)
//!     → matcher.rs (apply rewrite rules contributed by endpoints)
//!     → RequestContext (query vars + queried object)
//!
//! Rule Collection (at startup):
//!     Endpoints registry
//!     → rewrite_rules() in registration order
//!     → Frozen alongside the registry
//! ```
//!
//! # Design Decisions
//! - Rules compiled at startup, immutable at runtime
//! - No regex (segment matching only)
//! - Deterministic: same input always resolves the same way
//! - First matching rule wins

pub mod context;
pub mod matcher;

pub use context::{QueriedObject, RequestContext};
pub use matcher::RewriteRule;
