//! Metrics collection and exposition.
//!
//! # Metrics
//! - `endpoint_url_lookups_total` (counter): URL lookups by page, found
//! - `endpoint_page_checks_total` (counter): page checks by page, matched
//! - `http_requests_total` (counter): served requests by endpoint
//!
//! Without an installed recorder every update is a no-op.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_url_lookup(page: &str, found: bool) {
    metrics::counter!(
        "endpoint_url_lookups_total",
        "page" => page.to_string(),
        "found" => bool_label(found)
    )
    .increment(1);
}

pub fn record_page_check(page: &str, matched: bool) {
    metrics::counter!(
        "endpoint_page_checks_total",
        "page" => page.to_string(),
        "matched" => bool_label(matched)
    )
    .increment(1);
}

pub fn record_request(endpoint: Option<&str>) {
    metrics::counter!(
        "http_requests_total",
        "endpoint" => endpoint.unwrap_or("none").to_string()
    )
    .increment(1);
}

fn bool_label(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
