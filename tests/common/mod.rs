//! Shared fixtures for integration tests.

use charitable_endpoints::config::{
    AppConfig, CampaignConfig, DonationFormDisplay, PageConfig, PermalinkStyle,
};
use charitable_endpoints::lifecycle::Application;

/// A small pretty-permalink site with one campaign of each form style.
pub fn site_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.site.home_url = "https://give.example.org/".into();
    config.site.permalinks = PermalinkStyle::Pretty;
    config.site.campaigns = vec![
        CampaignConfig {
            id: 1,
            slug: "clean-water".into(),
            donation_form: DonationFormDisplay::SeparatePage,
        },
        CampaignConfig {
            id: 2,
            slug: "school-books".into(),
            donation_form: DonationFormDisplay::Modal,
        },
    ];
    config.site.pages = vec![PageConfig {
        id: 10,
        slug: "my-account".into(),
    }];
    config.site.profile_page = Some(10);
    config
}

#[allow(dead_code)]
pub fn application() -> Application {
    Application::from_config(site_config()).unwrap()
}
