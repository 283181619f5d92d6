//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, current endpoint)
//! - Bind server to listener
//! - Swap in a new application snapshot when the config changes

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    http::Request,
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::schema::AppConfig;
use crate::http::handlers;
use crate::http::middleware::current_endpoint::current_endpoint_middleware;
use crate::lifecycle::{Application, Shutdown};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<ArcSwap<Application>>,
}

impl AppState {
    pub fn new(app: Application) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(app)),
        }
    }

    /// Current application snapshot.
    pub fn load(&self) -> Arc<Application> {
        self.inner.load_full()
    }

    /// Replace the snapshot. In-flight requests keep the one they loaded.
    pub fn replace(&self, app: Application) {
        self.inner.store(Arc::new(app));
    }
}

/// HTTP server exposing the endpoint registry.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    pub fn new(app: Application) -> Self {
        let request_timeout = Duration::from_secs(app.config().timeouts.request_secs);
        let state = AppState::new(app);
        let router = build_router(state.clone(), request_timeout);
        Self { router, state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` is triggered.
    ///
    /// Every config received on `updates` rebuilds the application snapshot.
    /// Invalid configs are logged and the current snapshot is kept. The
    /// reload loop stops with the server.
    pub async fn run(
        self,
        listener: TcpListener,
        mut updates: mpsc::UnboundedReceiver<AppConfig>,
        shutdown: &Shutdown,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let state = self.state.clone();
        let mut stop = shutdown.subscribe();
        let reload = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = stop.recv() => break,
                    update = updates.recv() => match update {
                        Some(config) => apply_update(&state, config),
                        None => break,
                    },
                }
            }
            tracing::debug!("Config reload loop stopped");
        });

        let served = axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.signalled())
            .await;

        shutdown.trigger();
        if let Err(e) = reload.await {
            tracing::error!(error = %e, "Config reload task failed");
        }

        served?;
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn apply_update(state: &AppState, config: AppConfig) {
    let pending = restart_required(state.load().config(), &config);
    match Application::from_config(config) {
        Ok(app) => {
            if !pending.is_empty() {
                tracing::warn!(settings = ?pending, "Some settings only take effect after a restart");
            }
            state.replace(app);
            tracing::info!("Configuration reloaded");
        }
        Err(e) => {
            tracing::error!(error = %e, "Rejected new configuration, keeping current");
        }
    }
}

/// Settings that differ between `current` and `new` but are only read at
/// startup.
pub fn restart_required(current: &AppConfig, new: &AppConfig) -> Vec<&'static str> {
    let mut pending = Vec::new();
    if current.listener.bind_address != new.listener.bind_address {
        pending.push("listener.bind_address");
    }
    if current.timeouts.request_secs != new.timeouts.request_secs {
        pending.push("timeouts.request_secs");
    }
    if current.observability.log_level != new.observability.log_level {
        pending.push("observability.log_level");
    }
    if current.observability.metrics_enabled != new.observability.metrics_enabled
        || current.observability.metrics_address != new.observability.metrics_address
    {
        pending.push("observability.metrics");
    }
    pending
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/api/endpoints", get(handlers::list_endpoints))
        .route("/api/permalink/{page}", get(handlers::get_permalink))
        .route("/api/is-page/{page}", get(handlers::is_page))
        .fallback(handlers::current_page)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            current_endpoint_middleware,
        ))
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("unknown");
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id,
            )
        }))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
