//! Current endpoint resolution.
//! Attaches the name of the endpoint serving each request.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::http::server::AppState;
use crate::observability::metrics;

/// Name of the endpoint the request resolved to, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentEndpoint(pub Option<String>);

pub async fn current_endpoint_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let app = state.load();
    let request = app.endpoints().resolve(req.uri());
    let current = app.endpoints().current_endpoint(&request).map(str::to_string);

    tracing::debug!(
        path = %request.path(),
        object = ?request.queried_object(),
        endpoint = ?current,
        "Resolved current endpoint"
    );
    metrics::record_request(current.as_deref());

    req.extensions_mut().insert(CurrentEndpoint(current));
    next.run(req).await
}
