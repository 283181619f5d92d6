//! Current request resolution.
//!
//! # Responsibilities
//! - Parse the query string into query vars
//! - Apply rewrite rules to the path (first match wins)
//! - Resolve the queried object: home, campaign, page or endpoint
//!
//! # Design Decisions
//! - Rewrite captures override query-string vars of the same name
//! - Plain permalinks (`?campaign_id=`, `?page_id=`) only resolve on the home path
//! - Paths outside the site's home path resolve to `QueriedObject::Other`

use std::collections::BTreeMap;

use axum::http::Uri;
use url::form_urlencoded;

use crate::routing::matcher::RewriteRule;
use crate::site::Site;

/// What the current request is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueriedObject {
    Home,
    Campaign(u64),
    Page(u64),
    /// A virtual page produced by a rewrite rule (e.g. a donation receipt).
    Endpoint,
    /// Nothing on this site (unknown slug, foreign path, login script).
    Other,
}

/// The resolved state of the request being served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    path: String,
    vars: BTreeMap<String, String>,
    object: QueriedObject,
}

impl RequestContext {
    /// Resolve a request URI.
    pub fn from_uri(uri: &Uri, site: &Site, rules: &[RewriteRule]) -> Self {
        Self::resolve(uri.path(), uri.query(), site, rules)
    }

    /// Resolve a `path?query` string.
    pub fn parse(path_and_query: &str, site: &Site, rules: &[RewriteRule]) -> Self {
        match path_and_query.split_once('?') {
            Some((path, query)) => Self::resolve(path, Some(query), site, rules),
            None => Self::resolve(path_and_query, None, site, rules),
        }
    }

    fn resolve(path: &str, query: Option<&str>, site: &Site, rules: &[RewriteRule]) -> Self {
        let mut vars: BTreeMap<String, String> = query
            .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();

        let Some(relative) = strip_home(path, site.home_path()) else {
            return Self {
                path: path.to_string(),
                vars,
                object: QueriedObject::Other,
            };
        };

        let segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();

        let object = match rules.iter().find_map(|rule| rule.matches(&segments)) {
            Some(captured) => {
                let object = match captured.get("campaign") {
                    Some(slug) => site
                        .campaign_by_slug(slug)
                        .map(|c| QueriedObject::Campaign(c.id))
                        .unwrap_or(QueriedObject::Other),
                    None => QueriedObject::Endpoint,
                };
                vars.extend(captured);
                object
            }
            None => match segments.as_slice() {
                [] => home_object(&vars, site),
                ["campaigns", slug] => site
                    .campaign_by_slug(slug)
                    .map(|c| QueriedObject::Campaign(c.id))
                    .unwrap_or(QueriedObject::Other),
                [slug] => site
                    .page_by_slug(slug)
                    .map(|p| QueriedObject::Page(p.id))
                    .unwrap_or(QueriedObject::Other),
                _ => QueriedObject::Other,
            },
        };

        Self {
            path: path.to_string(),
            vars,
            object,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last non-empty path segment.
    pub fn last_segment(&self) -> Option<&str> {
        self.path.split('/').filter(|s| !s.is_empty()).last()
    }

    pub fn query_var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// True when the var is present, even with an empty value.
    pub fn has_query_var(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Numeric value of a query var, if present and well formed.
    pub fn query_var_id(&self, name: &str) -> Option<u64> {
        self.query_var(name).and_then(|v| v.parse().ok())
    }

    pub fn queried_object(&self) -> QueriedObject {
        self.object
    }

    pub fn campaign_id(&self) -> Option<u64> {
        match self.object {
            QueriedObject::Campaign(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_page_id(&self, id: u64) -> bool {
        self.object == QueriedObject::Page(id)
    }
}

fn strip_home<'a>(path: &'a str, home_path: &str) -> Option<&'a str> {
    if path == home_path.trim_end_matches('/') {
        return Some("");
    }
    path.strip_prefix(home_path)
}

fn home_object(vars: &BTreeMap<String, String>, site: &Site) -> QueriedObject {
    let id = |name: &str| vars.get(name).and_then(|v| v.parse::<u64>().ok());

    if let Some(campaign) = id("campaign_id").and_then(|id| site.campaign(id)) {
        return QueriedObject::Campaign(campaign.id);
    }
    if let Some(page) = id("page_id").and_then(|id| site.page(id)) {
        return QueriedObject::Page(page.id);
    }
    QueriedObject::Home
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{CampaignConfig, DonationFormDisplay, PageConfig, SiteConfig};

    fn site() -> Site {
        Site::from_config(&SiteConfig {
            home_url: "https://example.org/".into(),
            campaigns: vec![CampaignConfig {
                id: 5,
                slug: "trees".into(),
                donation_form: DonationFormDisplay::SeparatePage,
            }],
            pages: vec![PageConfig { id: 9, slug: "account".into() }],
            ..SiteConfig::default()
        })
        .unwrap()
    }

    fn rules() -> Vec<RewriteRule> {
        vec![
            RewriteRule::new("campaigns/{campaign}/donate").with_var("donate", "1"),
            RewriteRule::new("donation-receipt/{donation_id}").with_var("donation_receipt", "1"),
        ]
    }

    #[test]
    fn test_resolves_home_campaign_and_page() {
        let site = site();
        let rules = rules();

        assert_eq!(RequestContext::parse("/", &site, &rules).queried_object(), QueriedObject::Home);
        assert_eq!(
            RequestContext::parse("/campaigns/trees/", &site, &rules).queried_object(),
            QueriedObject::Campaign(5)
        );
        assert_eq!(
            RequestContext::parse("/account/", &site, &rules).queried_object(),
            QueriedObject::Page(9)
        );
        assert_eq!(
            RequestContext::parse("/missing/", &site, &rules).queried_object(),
            QueriedObject::Other
        );
    }

    #[test]
    fn test_rewrite_rule_sets_vars() {
        let site = site();
        let rules = rules();

        let request = RequestContext::parse("/campaigns/trees/donate/", &site, &rules);
        assert_eq!(request.campaign_id(), Some(5));
        assert!(request.has_query_var("donate"));

        let request = RequestContext::parse("/donation-receipt/77/", &site, &rules);
        assert_eq!(request.queried_object(), QueriedObject::Endpoint);
        assert_eq!(request.query_var_id("donation_id"), Some(77));
    }

    #[test]
    fn test_plain_query_vars() {
        let site = site();
        let request = RequestContext::parse("/?campaign_id=5&donate=1", &site, &[]);
        assert_eq!(request.campaign_id(), Some(5));
        assert_eq!(request.query_var("donate"), Some("1"));

        let request = RequestContext::parse("/?page_id=9", &site, &[]);
        assert!(request.is_page_id(9));

        let request = RequestContext::parse("/?campaign_id=6", &site, &[]);
        assert_eq!(request.queried_object(), QueriedObject::Home);
    }

    #[test]
    fn test_path_outside_home() {
        let site = Site::from_config(&SiteConfig {
            home_url: "https://example.org/give/".into(),
            ..SiteConfig::default()
        })
        .unwrap();

        assert_eq!(RequestContext::parse("/give", &site, &[]).queried_object(), QueriedObject::Home);
        assert_eq!(RequestContext::parse("/other/", &site, &[]).queried_object(), QueriedObject::Other);
    }

    #[test]
    fn test_from_uri() {
        let site = site();
        let uri: Uri = "/campaigns/trees/?widget=1".parse().unwrap();
        let request = RequestContext::from_uri(&uri, &site, &[]);
        assert_eq!(request.campaign_id(), Some(5));
        assert!(request.has_query_var("widget"));
        assert_eq!(request.last_segment(), Some("trees"));
    }
}
