//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the endpoint
//! service. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// The donation site the endpoints resolve against.
    pub site: SiteConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// How page URLs are shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PermalinkStyle {
    /// Path based: `/campaigns/save-the-whales/donate/`.
    #[default]
    Pretty,
    /// Query based: `/?campaign_id=12&donate=1`.
    Plain,
}

/// Where a campaign shows its donation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DonationFormDisplay {
    /// Form lives on its own `donate` endpoint.
    #[default]
    SeparatePage,
    /// Form is rendered inline on the campaign page.
    SamePage,
    /// Form opens in a modal over the campaign page.
    Modal,
}

/// Site model: home URL, permalink style, campaigns, pages and the pages
/// assigned to special roles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Home URL of the site (e.g., "https://example.org/").
    pub home_url: String,

    /// Permalink style.
    pub permalinks: PermalinkStyle,

    /// Page id used for donation receipts. `None` means the automatic
    /// `donation-receipt` endpoint.
    pub donation_receipt_page: Option<u64>,

    /// Page id of the login page. `None` falls back to the login script.
    pub login_page: Option<u64>,

    /// Page id of the registration page.
    pub registration_page: Option<u64>,

    /// Page id of the profile page.
    pub profile_page: Option<u64>,

    /// Published campaigns.
    pub campaigns: Vec<CampaignConfig>,

    /// Published pages.
    pub pages: Vec<PageConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            home_url: "http://localhost:8080/".to_string(),
            permalinks: PermalinkStyle::Pretty,
            donation_receipt_page: None,
            login_page: None,
            registration_page: None,
            profile_page: None,
            campaigns: Vec::new(),
            pages: Vec::new(),
        }
    }
}

/// A published campaign.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CampaignConfig {
    pub id: u64,
    pub slug: String,

    #[serde(default)]
    pub donation_form: DonationFormDisplay,
}

/// A published page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageConfig {
    pub id: u64,
    pub slug: String,
}

/// Timeout configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
