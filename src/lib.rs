//! Endpoint registry for a donation site.
//!
//! Pages are referred to by logical name (`campaign_donation`,
//! `donation_receipt`, `login`, ...). The registry turns a name into a URL
//! and tells whether the current request is for that page, so URL schemes
//! stay inside each endpoint instead of leaking into every caller.

pub mod config;
pub mod endpoints;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod site;

pub use config::schema::AppConfig;
pub use endpoints::{Endpoint, EndpointArgs, Endpoints};
pub use http::HttpServer;
pub use lifecycle::Application;
