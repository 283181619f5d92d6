//! Endpoint subsystem: symbolic page names mapped to URL builders and
//! request matchers.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Site (from config)
//!     → Endpoints::with_defaults (register built-in endpoints)
//!     → collect rewrite rules
//!
//! URL lookup:
//!     get_page_url("donation_receipt", args)
//!     → normalize name → endpoint.build_url(site, args)
//!     → Some(url) | None
//!
//! Page check:
//!     is_page("campaign_donation", request, args)
//!     → normalize name → endpoint.matches_current_request(site, request, args)
//!     → bool
//! ```

pub mod account;
pub mod campaign;
pub mod donation;
pub mod endpoint;
pub mod functions;
pub mod registry;

pub use endpoint::{Endpoint, EndpointArgs, InvalidArg};
pub use registry::{normalize_page_name, EndpointError, Endpoints};
