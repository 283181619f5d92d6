//! Donation site endpoint service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http server ──▶ routing (rewrite rules, query vars)
//!                                          │
//!                                          ▼
//!                                  endpoints registry ──▶ site model
//!                                          │
//!     JSON Response                        ▼
//!     ◀────────────── handlers ◀─── URL / page match
//!
//!     config (TOML) ──▶ watcher ──▶ new Application snapshot (arc-swap)
//! ```

use std::path::PathBuf;

use clap::Parser;

use charitable_endpoints::config::{load_config, AppConfig};
use charitable_endpoints::lifecycle::startup;
use charitable_endpoints::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "charitable-endpoints")]
#[command(about = "Serve the donation site endpoint registry", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?cli.config,
        bind_address = %config.listener.bind_address,
        "charitable-endpoints starting"
    );

    startup::run(config, cli.config).await?;
    Ok(())
}
