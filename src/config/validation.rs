//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (special pages reference existing pages)
//! - Detect duplicate campaign/page ids and slugs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("site.home_url '{0}' is not an absolute http(s) URL")]
    InvalidHomeUrl(String),

    #[error("duplicate campaign id {0}")]
    DuplicateCampaignId(u64),

    #[error("duplicate campaign slug '{0}'")]
    DuplicateCampaignSlug(String),

    #[error("duplicate page id {0}")]
    DuplicatePageId(u64),

    #[error("duplicate page slug '{0}'")]
    DuplicatePageSlug(String),

    #[error("slug '{0}' must be a single non-empty path segment")]
    InvalidSlug(String),

    #[error("site.{role} refers to unknown page {id}")]
    UnknownPage { role: &'static str, id: u64 },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let site = &config.site;
    match Url::parse(&site.home_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
        _ => errors.push(ValidationError::InvalidHomeUrl(site.home_url.clone())),
    }

    let mut ids = HashSet::new();
    let mut slugs = HashSet::new();
    for campaign in &site.campaigns {
        if !ids.insert(campaign.id) {
            errors.push(ValidationError::DuplicateCampaignId(campaign.id));
        }
        check_slug(&campaign.slug, &mut errors);
        if !slugs.insert(campaign.slug.as_str()) {
            errors.push(ValidationError::DuplicateCampaignSlug(campaign.slug.clone()));
        }
    }

    let mut page_ids = HashSet::new();
    let mut page_slugs = HashSet::new();
    for page in &site.pages {
        if !page_ids.insert(page.id) {
            errors.push(ValidationError::DuplicatePageId(page.id));
        }
        check_slug(&page.slug, &mut errors);
        if !page_slugs.insert(page.slug.as_str()) {
            errors.push(ValidationError::DuplicatePageSlug(page.slug.clone()));
        }
    }

    let roles = [
        ("donation_receipt_page", site.donation_receipt_page),
        ("login_page", site.login_page),
        ("registration_page", site.registration_page),
        ("profile_page", site.profile_page),
    ];
    for (role, id) in roles {
        if let Some(id) = id {
            if !page_ids.contains(&id) {
                errors.push(ValidationError::UnknownPage { role, id });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_slug(slug: &str, errors: &mut Vec<ValidationError>) {
    if slug.is_empty() || slug.contains('/') || slug.contains('?') {
        errors.push(ValidationError::InvalidSlug(slug.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{CampaignConfig, DonationFormDisplay, PageConfig};

    fn campaign(id: u64, slug: &str) -> CampaignConfig {
        CampaignConfig {
            id,
            slug: slug.into(),
            donation_form: DonationFormDisplay::SeparatePage,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&AppConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AppConfig::default();
        config.site.home_url = "not a url".into();
        config.site.campaigns = vec![campaign(1, "whales"), campaign(1, "whales")];
        config.site.login_page = Some(99);

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::InvalidHomeUrl("not a url".into())));
        assert!(errors.contains(&ValidationError::DuplicateCampaignId(1)));
        assert!(errors.contains(&ValidationError::DuplicateCampaignSlug("whales".into())));
        assert!(errors.contains(&ValidationError::UnknownPage { role: "login_page", id: 99 }));
    }

    #[test]
    fn test_special_page_must_exist() {
        let mut config = AppConfig::default();
        config.site.pages = vec![PageConfig { id: 4, slug: "receipt".into() }];
        config.site.donation_receipt_page = Some(4);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_rejects_nested_slug() {
        let mut config = AppConfig::default();
        config.site.pages = vec![PageConfig { id: 4, slug: "a/b".into() }];
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::InvalidSlug("a/b".into())]);
    }
}
