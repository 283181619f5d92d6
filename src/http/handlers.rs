//! Request handlers for the endpoint API and the site fallback.

use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::{json, Value};

use crate::endpoints::{EndpointArgs, InvalidArg};
use crate::http::middleware::current_endpoint::CurrentEndpoint;
use crate::http::server::AppState;

/// `GET /api/endpoints`: registered page names in registration order.
pub async fn list_endpoints(State(state): State<AppState>) -> Json<Vec<String>> {
    let app = state.load();
    Json(app.endpoints().names().map(String::from).collect())
}

/// `GET /api/permalink/{page}`: the page URL, or 404 with `url: false`.
pub async fn get_permalink(
    State(state): State<AppState>,
    Path(page): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let app = state.load();
    let args = match EndpointArgs::from_pairs(params) {
        Ok(args) => args,
        Err(e) => return bad_request(&page, e),
    };

    match app.endpoints().get_page_url(&page, &args) {
        Some(url) => Json(json!({ "page": page, "url": url })).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "page": page, "url": false })),
        )
            .into_response(),
    }
}

/// `GET /api/is-page/{page}?path=...`: whether the request at `path`
/// (default `/`) is for `page`. Remaining params become endpoint args.
pub async fn is_page(
    State(state): State<AppState>,
    Path(page): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let app = state.load();

    let (path, rest): (Vec<_>, Vec<_>) = params.into_iter().partition(|(k, _)| k == "path");
    let path = path
        .into_iter()
        .next()
        .map(|(_, v)| v)
        .unwrap_or_else(|| "/".to_string());

    let args = match EndpointArgs::from_pairs(rest) {
        Ok(args) => args,
        Err(e) => return bad_request(&page, e),
    };

    let request = app.endpoints().resolve_path(&path);
    let matches = app.endpoints().is_page(&page, &request, &args);

    Json(json!({ "page": page, "path": path, "matches": matches })).into_response()
}

fn bad_request(page: &str, err: InvalidArg) -> Response {
    tracing::debug!(page = %page, error = %err, "Rejected endpoint args");
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "page": page, "error": err.to_string() })),
    )
        .into_response()
}

/// Any other path: report which endpoint the request resolves to.
pub async fn current_page(
    Extension(current): Extension<CurrentEndpoint>,
    uri: Uri,
) -> Json<Value> {
    Json(json!({ "path": uri.path(), "endpoint": current.0 }))
}
