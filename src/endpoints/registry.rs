//! The endpoint registry.
//!
//! # Responsibilities
//! - Store endpoints keyed by logical page name
//! - Resolve a page name to a URL
//! - Test whether a request is for a page
//! - Find the endpoint serving the current request
//!
//! # Design Decisions
//! - Explicitly constructed and owned by the application; no global instance
//! - First registration wins; duplicates are rejected, not overwritten
//! - A trailing `_page` in a name is ignored (`donation_receipt_page` == `donation_receipt`)
//! - O(1) name lookup via HashMap, registration order kept for `current_endpoint`
//! - Nothing is cached: every lookup asks the endpoint

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::Uri;
use thiserror::Error;

use crate::endpoints::account::{LoginEndpoint, ProfileEndpoint, RegistrationEndpoint};
use crate::endpoints::campaign::{
    CampaignDonationEndpoint, CampaignWidgetEndpoint, DonationCancelEndpoint,
};
use crate::endpoints::donation::{DonationProcessingEndpoint, DonationReceiptEndpoint};
use crate::endpoints::endpoint::{Endpoint, EndpointArgs};
use crate::observability::metrics;
use crate::routing::{RequestContext, RewriteRule};
use crate::site::Site;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("endpoint name must not be empty")]
    EmptyName,

    #[error("endpoint '{0}' is already registered")]
    AlreadyRegistered(String),
}

/// Strip a trailing `_page` from a page name.
pub fn normalize_page_name(page: &str) -> &str {
    page.strip_suffix("_page").unwrap_or(page)
}

/// Central lookup table from page name to endpoint.
#[derive(Debug)]
pub struct Endpoints {
    site: Arc<Site>,
    endpoints: Vec<Box<dyn Endpoint>>,
    index: HashMap<String, usize>,
    rules: Vec<RewriteRule>,
}

impl Endpoints {
    /// Create an empty registry for `site`.
    pub fn new(site: Arc<Site>) -> Self {
        Self {
            site,
            endpoints: Vec::new(),
            index: HashMap::new(),
            rules: Vec::new(),
        }
    }

    /// Create a registry with every built-in endpoint registered.
    ///
    /// More specific endpoints come first so `current_endpoint` prefers them.
    pub fn with_defaults(site: Arc<Site>) -> Self {
        let builtin: Vec<Box<dyn Endpoint>> = vec![
            Box::new(DonationCancelEndpoint),
            Box::new(CampaignWidgetEndpoint),
            Box::new(CampaignDonationEndpoint),
            Box::new(DonationProcessingEndpoint),
            Box::new(DonationReceiptEndpoint),
            Box::new(LoginEndpoint),
            Box::new(RegistrationEndpoint),
            Box::new(ProfileEndpoint),
        ];

        let mut endpoints = Self::new(site);
        for endpoint in builtin {
            if let Err(e) = endpoints.register_boxed(endpoint) {
                tracing::error!(error = %e, "Failed to register built-in endpoint");
            }
        }
        endpoints
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    /// Register an endpoint under its id.
    pub fn register<E: Endpoint + 'static>(&mut self, endpoint: E) -> Result<(), EndpointError> {
        self.register_boxed(Box::new(endpoint))
    }

    pub fn register_boxed(&mut self, endpoint: Box<dyn Endpoint>) -> Result<(), EndpointError> {
        let name = normalize_page_name(endpoint.id()).to_string();
        if name.is_empty() {
            return Err(EndpointError::EmptyName);
        }
        if self.index.contains_key(&name) {
            tracing::warn!(endpoint = %name, "Endpoint already registered, ignoring");
            return Err(EndpointError::AlreadyRegistered(name));
        }

        self.rules.extend(endpoint.rewrite_rules());
        self.index.insert(name.clone(), self.endpoints.len());
        self.endpoints.push(endpoint);

        tracing::debug!(endpoint = %name, "Endpoint registered");
        Ok(())
    }

    pub fn get(&self, page: &str) -> Option<&dyn Endpoint> {
        self.index
            .get(normalize_page_name(page))
            .map(|&i| self.endpoints[i].as_ref())
    }

    pub fn contains(&self, page: &str) -> bool {
        self.get(page).is_some()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.endpoints.iter().map(|e| normalize_page_name(e.id()))
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Rewrite rules of every endpoint, in registration order.
    pub fn rewrite_rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// URL of `page`, or `None` when the page is unknown or cannot be built
    /// from `args`.
    pub fn get_page_url(&self, page: &str, args: &EndpointArgs) -> Option<String> {
        let Some(endpoint) = self.get(page) else {
            tracing::debug!(page = %page, "No endpoint registered for page");
            metrics::record_url_lookup("unknown", false);
            return None;
        };

        let url = endpoint.build_url(&self.site, args);
        metrics::record_url_lookup(normalize_page_name(endpoint.id()), url.is_some());
        url
    }

    /// Whether `request` is for `page`. Unknown pages never match.
    pub fn is_page(&self, page: &str, request: &RequestContext, args: &EndpointArgs) -> bool {
        let Some(endpoint) = self.get(page) else {
            tracing::debug!(page = %page, "No endpoint registered for page");
            return false;
        };

        let matched = endpoint.matches_current_request(&self.site, request, args);
        metrics::record_page_check(normalize_page_name(endpoint.id()), matched);
        matched
    }

    /// Name of the first endpoint, in registration order, matching `request`.
    pub fn current_endpoint(&self, request: &RequestContext) -> Option<&str> {
        let args = EndpointArgs::default();
        self.endpoints
            .iter()
            .find(|e| e.matches_current_request(&self.site, request, &args))
            .map(|e| normalize_page_name(e.id()))
    }

    /// Resolve a request URI against this registry's site and rules.
    pub fn resolve(&self, uri: &Uri) -> RequestContext {
        RequestContext::from_uri(uri, &self.site, &self.rules)
    }

    /// Resolve a `path?query` string against this registry's site and rules.
    pub fn resolve_path(&self, path_and_query: &str) -> RequestContext {
        RequestContext::parse(path_and_query, &self.site, &self.rules)
    }
}
