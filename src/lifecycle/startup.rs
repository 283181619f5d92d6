//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the application snapshot (site + endpoint registry) from config
//! - Start background tasks (config watcher, metrics)
//! - Bind the listener and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - One `Application` owns the registry; handlers borrow it through `AppState`
//! - Listener starts last (traffic only when ready)

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::config::loader::ConfigError;
use crate::config::schema::AppConfig;
use crate::config::validation::validate_config;
use crate::config::watcher::ConfigWatcher;
use crate::endpoints::Endpoints;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::shutdown_signal;
use crate::observability::metrics;
use crate::site::Site;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid home URL: {0}")]
    HomeUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Root owner of the site model and the endpoint registry.
#[derive(Debug)]
pub struct Application {
    config: AppConfig,
    site: Arc<Site>,
    endpoints: Endpoints,
}

impl Application {
    pub fn from_config(config: AppConfig) -> Result<Self, StartupError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        let site = Arc::new(Site::from_config(&config.site)?);
        let endpoints = Endpoints::with_defaults(site.clone());

        tracing::info!(
            home = %site.home_url(""),
            permalinks = ?site.permalinks(),
            campaigns = site.campaigns().len(),
            endpoints = endpoints.len(),
            "Application initialized"
        );

        Ok(Self {
            config,
            site,
            endpoints,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn site_arc(&self) -> Arc<Site> {
        self.site.clone()
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

/// Run the service until a shutdown signal arrives.
///
/// With a `config_path`, changes to the file are picked up without a restart.
pub async fn run(config: AppConfig, config_path: Option<PathBuf>) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    // Keep the watcher alive for the lifetime of the server.
    let (_watcher, updates) = match config_path {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(&path, config.clone());
            match watcher.run() {
                Ok(handle) => (Some(handle), updates),
                Err(e) => {
                    tracing::warn!(error = %e, "Config watcher unavailable, hot reload disabled");
                    (None, updates)
                }
            }
        }
        None => (None, mpsc::unbounded_channel().1),
    };

    let server = HttpServer::new(Application::from_config(config)?);

    let shutdown = Shutdown::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        trigger.trigger();
    });

    server.run(listener, updates, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
