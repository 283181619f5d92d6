//! Endpoints addressed by donation: receipt and processing.

use crate::endpoints::endpoint::{Endpoint, EndpointArgs};
use crate::routing::{RequestContext, RewriteRule};
use crate::site::{add_query_args, Site};

/// Automatic `/{slug}/{donation_id}/` endpoint, or `?donation_id=&{var}=1`
/// on plain permalinks.
fn automatic_url(site: &Site, slug: &str, var: &str, donation_id: u64) -> String {
    if site.uses_pretty_permalinks() {
        site.home_url(&format!("{slug}/{donation_id}/"))
    } else {
        add_query_args(
            &site.home_url(""),
            &[("donation_id", donation_id.to_string()), (var, "1".to_string())],
        )
    }
}

/// The receipt shown after a completed donation.
///
/// Uses the configured receipt page when there is one, otherwise the
/// automatic `donation-receipt` endpoint.
#[derive(Debug, Default)]
pub struct DonationReceiptEndpoint;

impl DonationReceiptEndpoint {
    pub const ID: &'static str = "donation_receipt";
}

impl Endpoint for DonationReceiptEndpoint {
    fn id(&self) -> &str {
        Self::ID
    }

    fn build_url(&self, site: &Site, args: &EndpointArgs) -> Option<String> {
        let donation_id = args.donation_id?;
        let url = match site.special_pages().donation_receipt {
            Some(page) => add_query_args(
                &site.page_permalink(page)?,
                &[("donation_id", donation_id.to_string())],
            ),
            None => automatic_url(site, "donation-receipt", "donation_receipt", donation_id),
        };
        Some(args.decorate(url))
    }

    fn matches_current_request(
        &self,
        site: &Site,
        request: &RequestContext,
        args: &EndpointArgs,
    ) -> bool {
        let on_receipt = match site.special_pages().donation_receipt {
            Some(page) => request.is_page_id(page) && request.has_query_var("donation_id"),
            None => request.has_query_var("donation_receipt"),
        };
        on_receipt && args.accepts_donation(request)
    }

    fn rewrite_rules(&self) -> Vec<RewriteRule> {
        vec![RewriteRule::new("donation-receipt/{donation_id}").with_var("donation_receipt", "1")]
    }
}

/// Interstitial page that hands a pending donation to its payment gateway.
#[derive(Debug, Default)]
pub struct DonationProcessingEndpoint;

impl DonationProcessingEndpoint {
    pub const ID: &'static str = "donation_processing";
}

impl Endpoint for DonationProcessingEndpoint {
    fn id(&self) -> &str {
        Self::ID
    }

    fn build_url(&self, site: &Site, args: &EndpointArgs) -> Option<String> {
        let url = automatic_url(
            site,
            "donation-processing",
            "donation_processing",
            args.donation_id?,
        );
        Some(args.decorate(url))
    }

    fn matches_current_request(
        &self,
        _site: &Site,
        request: &RequestContext,
        args: &EndpointArgs,
    ) -> bool {
        request.has_query_var("donation_processing") && args.accepts_donation(request)
    }

    fn rewrite_rules(&self) -> Vec<RewriteRule> {
        vec![RewriteRule::new("donation-processing/{donation_id}").with_var("donation_processing", "1")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{PageConfig, PermalinkStyle, SiteConfig};

    fn site(permalinks: PermalinkStyle, receipt_page: Option<u64>) -> Site {
        Site::from_config(&SiteConfig {
            home_url: "https://example.org/".into(),
            permalinks,
            donation_receipt_page: receipt_page,
            pages: vec![PageConfig { id: 21, slug: "thank-you".into() }],
            ..SiteConfig::default()
        })
        .unwrap()
    }

    fn rules() -> Vec<RewriteRule> {
        let mut rules = DonationReceiptEndpoint.rewrite_rules();
        rules.extend(DonationProcessingEndpoint.rewrite_rules());
        rules
    }

    #[test]
    fn test_automatic_receipt() {
        let site = site(PermalinkStyle::Pretty, None);
        let args = EndpointArgs::new().donation(88);
        assert_eq!(
            DonationReceiptEndpoint.build_url(&site, &args).as_deref(),
            Some("https://example.org/donation-receipt/88/")
        );

        let receipt = RequestContext::parse("/donation-receipt/88/", &site, &rules());
        assert!(DonationReceiptEndpoint.matches_current_request(&site, &receipt, &EndpointArgs::new()));
        assert!(DonationReceiptEndpoint.matches_current_request(&site, &receipt, &args));
        assert!(!DonationReceiptEndpoint.matches_current_request(&site, &receipt, &EndpointArgs::new().donation(89)));

        let home = RequestContext::parse("/", &site, &rules());
        assert!(!DonationReceiptEndpoint.matches_current_request(&site, &home, &EndpointArgs::new()));
    }

    #[test]
    fn test_plain_receipt() {
        let site = site(PermalinkStyle::Plain, None);
        let url = DonationReceiptEndpoint
            .build_url(&site, &EndpointArgs::new().donation(5))
            .unwrap();
        assert_eq!(url, "https://example.org/?donation_id=5&donation_receipt=1");

        let request = RequestContext::parse("/?donation_id=5&donation_receipt=1", &site, &rules());
        assert!(DonationReceiptEndpoint.matches_current_request(&site, &request, &EndpointArgs::new()));
    }

    #[test]
    fn test_configured_receipt_page() {
        let site = site(PermalinkStyle::Pretty, Some(21));
        assert_eq!(
            DonationReceiptEndpoint
                .build_url(&site, &EndpointArgs::new().donation(3))
                .as_deref(),
            Some("https://example.org/thank-you/?donation_id=3")
        );

        let on_page = RequestContext::parse("/thank-you/?donation_id=3", &site, &rules());
        assert!(DonationReceiptEndpoint.matches_current_request(&site, &on_page, &EndpointArgs::new()));

        let without_donation = RequestContext::parse("/thank-you/", &site, &rules());
        assert!(!DonationReceiptEndpoint.matches_current_request(&site, &without_donation, &EndpointArgs::new()));
    }

    #[test]
    fn test_receipt_requires_donation() {
        let site = site(PermalinkStyle::Pretty, None);
        assert_eq!(DonationReceiptEndpoint.build_url(&site, &EndpointArgs::new()), None);
    }

    #[test]
    fn test_processing() {
        let site = site(PermalinkStyle::Pretty, None);
        assert_eq!(
            DonationProcessingEndpoint
                .build_url(&site, &EndpointArgs::new().donation(9))
                .as_deref(),
            Some("https://example.org/donation-processing/9/")
        );

        let request = RequestContext::parse("/donation-processing/9/", &site, &rules());
        assert!(DonationProcessingEndpoint.matches_current_request(&site, &request, &EndpointArgs::new()));
        assert!(!DonationReceiptEndpoint.matches_current_request(&site, &request, &EndpointArgs::new()));
    }
}
