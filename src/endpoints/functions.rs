//! Page helpers for templates, emails and redirects.
//!
//! Thin wrappers over [`Endpoints`]. The fixed-name helpers
//! (`get_campaign_donation_page_permalink` and friends) are kept for callers
//! written before the generic `get_permalink`/`is_page` pair existed; they
//! produce exactly the same results.

use crate::endpoints::campaign::{CampaignDonationEndpoint, CampaignWidgetEndpoint};
use crate::endpoints::donation::{DonationProcessingEndpoint, DonationReceiptEndpoint};
use crate::endpoints::endpoint::{Endpoint, EndpointArgs};
use crate::endpoints::registry::{EndpointError, Endpoints};
use crate::lifecycle::Application;
use crate::routing::RequestContext;

/// The endpoint registry owned by `app`.
pub fn get_endpoints_api(app: &Application) -> &Endpoints {
    app.endpoints()
}

pub fn register_endpoint<E: Endpoint + 'static>(
    endpoints: &mut Endpoints,
    endpoint: E,
) -> Result<(), EndpointError> {
    endpoints.register(endpoint)
}

/// URL for `page`, e.g. `get_permalink(endpoints, "login_page", &args)`.
pub fn get_permalink(endpoints: &Endpoints, page: &str, args: &EndpointArgs) -> Option<String> {
    endpoints.get_page_url(page, args)
}

/// Whether `request` is for `page`.
pub fn is_page(
    endpoints: &Endpoints,
    request: &RequestContext,
    page: &str,
    args: &EndpointArgs,
) -> bool {
    endpoints.is_page(page, request, args)
}

pub fn get_campaign_donation_page_permalink(
    endpoints: &Endpoints,
    args: &EndpointArgs,
) -> Option<String> {
    endpoints.get_page_url(CampaignDonationEndpoint::ID, args)
}

/// True when viewing a campaign with the `donate` var set, or a campaign
/// that shows its donation form on the campaign page or in a modal.
/// Pass `strict` to only accept the `donate` var.
pub fn is_campaign_donation_page(
    endpoints: &Endpoints,
    request: &RequestContext,
    args: &EndpointArgs,
) -> bool {
    endpoints.is_page(CampaignDonationEndpoint::ID, request, args)
}

pub fn get_donation_receipt_page_permalink(
    endpoints: &Endpoints,
    args: &EndpointArgs,
) -> Option<String> {
    endpoints.get_page_url(DonationReceiptEndpoint::ID, args)
}

pub fn is_donation_receipt_page(endpoints: &Endpoints, request: &RequestContext) -> bool {
    endpoints.is_page(DonationReceiptEndpoint::ID, request, &EndpointArgs::default())
}

pub fn get_donation_processing_page_permalink(
    endpoints: &Endpoints,
    args: &EndpointArgs,
) -> Option<String> {
    endpoints.get_page_url(DonationProcessingEndpoint::ID, args)
}

pub fn is_donation_processing_page(endpoints: &Endpoints, request: &RequestContext) -> bool {
    endpoints.is_page(DonationProcessingEndpoint::ID, request, &EndpointArgs::default())
}

pub fn get_campaign_widget_page_permalink(
    endpoints: &Endpoints,
    args: &EndpointArgs,
) -> Option<String> {
    endpoints.get_page_url(CampaignWidgetEndpoint::ID, args)
}

pub fn is_campaign_widget_page(endpoints: &Endpoints, request: &RequestContext) -> bool {
    endpoints.is_page(CampaignWidgetEndpoint::ID, request, &EndpointArgs::default())
}
