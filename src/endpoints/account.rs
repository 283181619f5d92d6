//! Donor account pages: login, registration and profile.
//!
//! Login and registration fall back to the site's login script when no
//! page has been assigned. The profile page has no fallback.

use crate::endpoints::endpoint::{Endpoint, EndpointArgs};
use crate::routing::RequestContext;
use crate::site::{add_query_args, Site};

const LOGIN_SCRIPT: &str = "wp-login.php";

/// True when the request is for the login script directly under the home path.
fn on_login_script(site: &Site, request: &RequestContext) -> bool {
    request
        .path()
        .strip_prefix(site.home_path())
        .is_some_and(|rest| rest == LOGIN_SCRIPT)
}

#[derive(Debug, Default)]
pub struct LoginEndpoint;

impl LoginEndpoint {
    pub const ID: &'static str = "login";
}

impl Endpoint for LoginEndpoint {
    fn id(&self) -> &str {
        Self::ID
    }

    fn build_url(&self, site: &Site, args: &EndpointArgs) -> Option<String> {
        let url = site
            .special_pages()
            .login
            .and_then(|page| site.page_permalink(page))
            .unwrap_or_else(|| site.home_url(LOGIN_SCRIPT));
        Some(args.decorate(url))
    }

    fn matches_current_request(
        &self,
        site: &Site,
        request: &RequestContext,
        _args: &EndpointArgs,
    ) -> bool {
        match site.special_pages().login {
            Some(page) => request.is_page_id(page),
            None => on_login_script(site, request) && request.query_var("action") != Some("register"),
        }
    }
}

#[derive(Debug, Default)]
pub struct RegistrationEndpoint;

impl RegistrationEndpoint {
    pub const ID: &'static str = "registration";
}

impl Endpoint for RegistrationEndpoint {
    fn id(&self) -> &str {
        Self::ID
    }

    fn build_url(&self, site: &Site, args: &EndpointArgs) -> Option<String> {
        let url = site
            .special_pages()
            .registration
            .and_then(|page| site.page_permalink(page))
            .unwrap_or_else(|| add_query_args(&site.home_url(LOGIN_SCRIPT), &[("action", "register")]));
        Some(args.decorate(url))
    }

    fn matches_current_request(
        &self,
        site: &Site,
        request: &RequestContext,
        _args: &EndpointArgs,
    ) -> bool {
        match site.special_pages().registration {
            Some(page) => request.is_page_id(page),
            None => on_login_script(site, request) && request.query_var("action") == Some("register"),
        }
    }
}

#[derive(Debug, Default)]
pub struct ProfileEndpoint;

impl ProfileEndpoint {
    pub const ID: &'static str = "profile";
}

impl Endpoint for ProfileEndpoint {
    fn id(&self) -> &str {
        Self::ID
    }

    fn build_url(&self, site: &Site, args: &EndpointArgs) -> Option<String> {
        let page = site.special_pages().profile?;
        site.page_permalink(page).map(|url| args.decorate(url))
    }

    fn matches_current_request(
        &self,
        site: &Site,
        request: &RequestContext,
        _args: &EndpointArgs,
    ) -> bool {
        site.special_pages()
            .profile
            .is_some_and(|page| request.is_page_id(page))
    }
}
