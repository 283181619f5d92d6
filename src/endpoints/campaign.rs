//! Endpoints that hang off a campaign: donate, widget and cancellation.

use crate::endpoints::endpoint::{Endpoint, EndpointArgs};
use crate::routing::{RequestContext, RewriteRule};
use crate::site::{add_query_args, Campaign, Site};

/// URL of a campaign's `donate` endpoint.
fn donate_url(site: &Site, campaign_id: u64) -> Option<String> {
    suffixed_url(site, campaign_id, "donate")
}

fn suffixed_url(site: &Site, campaign_id: u64, var: &str) -> Option<String> {
    let permalink = site.campaign_permalink(campaign_id)?;
    Some(if site.uses_pretty_permalinks() {
        format!("{permalink}{var}/")
    } else {
        add_query_args(&permalink, &[(var, "1")])
    })
}

/// Campaign the request is for, if it satisfies the campaign constraint.
fn current_campaign(request: &RequestContext, args: &EndpointArgs) -> Option<u64> {
    request
        .campaign_id()
        .filter(|id| args.accepts_campaign(*id))
}

/// The donation form of a campaign.
///
/// Non-strict matching also accepts the campaign page itself when the
/// campaign shows its form inline or in a modal.
#[derive(Debug, Default)]
pub struct CampaignDonationEndpoint;

impl CampaignDonationEndpoint {
    pub const ID: &'static str = "campaign_donation";
}

impl Endpoint for CampaignDonationEndpoint {
    fn id(&self) -> &str {
        Self::ID
    }

    fn build_url(&self, site: &Site, args: &EndpointArgs) -> Option<String> {
        let url = donate_url(site, args.campaign_id?)?;
        Some(args.decorate(url))
    }

    fn matches_current_request(
        &self,
        site: &Site,
        request: &RequestContext,
        args: &EndpointArgs,
    ) -> bool {
        let Some(campaign_id) = current_campaign(request, args) else {
            return false;
        };

        if request.has_query_var("donate") {
            return true;
        }

        !args.strict
            && site
                .campaign(campaign_id)
                .is_some_and(Campaign::shows_form_on_campaign_page)
    }

    fn rewrite_rules(&self) -> Vec<RewriteRule> {
        vec![RewriteRule::new("campaigns/{campaign}/donate").with_var("donate", "1")]
    }
}

/// The embeddable campaign widget.
#[derive(Debug, Default)]
pub struct CampaignWidgetEndpoint;

impl CampaignWidgetEndpoint {
    pub const ID: &'static str = "campaign_widget";
}

impl Endpoint for CampaignWidgetEndpoint {
    fn id(&self) -> &str {
        Self::ID
    }

    fn build_url(&self, site: &Site, args: &EndpointArgs) -> Option<String> {
        let url = suffixed_url(site, args.campaign_id?, "widget")?;
        Some(args.decorate(url))
    }

    fn matches_current_request(
        &self,
        _site: &Site,
        request: &RequestContext,
        args: &EndpointArgs,
    ) -> bool {
        current_campaign(request, args).is_some() && request.has_query_var("widget")
    }

    fn rewrite_rules(&self) -> Vec<RewriteRule> {
        vec![RewriteRule::new("campaigns/{campaign}/widget").with_var("widget", "1")]
    }
}

/// Landing page for a donation cancelled at the payment gateway: the
/// donation form again, flagged with `cancel=true` and the donation id.
#[derive(Debug, Default)]
pub struct DonationCancelEndpoint;

impl DonationCancelEndpoint {
    pub const ID: &'static str = "donation_cancel";
}

impl Endpoint for DonationCancelEndpoint {
    fn id(&self) -> &str {
        Self::ID
    }

    fn build_url(&self, site: &Site, args: &EndpointArgs) -> Option<String> {
        let donation_id = args.donation_id?;
        let url = donate_url(site, args.campaign_id?)?;
        let url = add_query_args(
            &url,
            &[("donation_id", donation_id.to_string()), ("cancel", "true".to_string())],
        );
        Some(args.decorate(url))
    }

    fn matches_current_request(
        &self,
        _site: &Site,
        request: &RequestContext,
        args: &EndpointArgs,
    ) -> bool {
        current_campaign(request, args).is_some()
            && request.has_query_var("donate")
            && matches!(request.query_var("cancel"), Some("true" | "1"))
            && request.query_var_id("donation_id").is_some()
            && args.accepts_donation(request)
    }
}
