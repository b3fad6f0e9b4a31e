//! Impact Sim - asteroid impact consequence service
//!
//! # Usage
//!
//! ```bash
//! # Serve the HTTP API (JSON file store at ./impacts.json)
//! cargo run --release
//!
//! # Use the sled store and a different port
//! ./impact-sim --store sled --addr 0.0.0.0:8080
//!
//! # One-off calculation, nothing stored
//! ./impact-sim simulate --diameter-m 140 --velocity-km-s 17
//!
//! # Print one page of the NASA NEO feed
//! ./impact-sim neo --page 0 --size 10
//! ```
//!
//! # Environment Variables
//!
//! - `NASA_API_KEY`: NeoWs API key (prompted for and saved to `.env` if missing)
//! - `IMPACT_SIM_CONFIG`: Path to a TOML config file
//! - `IMPACT_SIM_ADDR`, `IMPACT_SIM_STORE`, `IMPACT_SIM_DATA_PATH`, `IMPACT_SIM_CORS_ORIGINS`
//! - `RUST_LOG`: Logging level (default: info)
//! - `RESET_DB`: Set to "true" to wipe stored simulations on startup

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use impact_sim::api::{create_app, ApiState};
use impact_sim::config::{self, defaults, AppConfig, StorageBackend};
use impact_sim::neo::{NeoClient, NeoClientError, NeoFeed};
use impact_sim::physics_engine::{try_assess_impact, ImpactAssessment};
use impact_sim::storage;
use impact_sim::types::{BrowseQuery, ImpactRequest, NeoFeedResponse};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "impact-sim")]
#[command(about = "Asteroid impact consequence estimator and NEO feed API")]
#[command(version)]
struct CliArgs {
    /// Override the server address (default: "127.0.0.1:5000")
    #[arg(short, long)]
    addr: Option<String>,

    /// Storage backend: json, sled or memory
    #[arg(long)]
    store: Option<StorageBackend>,

    /// Record file (json) or database directory (sled)
    #[arg(long, value_name = "PATH")]
    data_path: Option<PathBuf>,

    /// Never prompt for a missing NASA API key
    #[arg(long)]
    no_prompt: bool,

    /// Delete all stored simulations on startup.
    /// Can also be set via RESET_DB=true environment variable.
    #[arg(long)]
    reset_db: bool,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Run the HTTP API (the default)
    Serve,

    /// Run the impact pipeline once and print the result (not stored)
    Simulate {
        /// Asteroid diameter (m)
        #[arg(long, default_value_t = defaults::DEFAULT_DIAMETER_M)]
        diameter_m: f64,
        /// Entry velocity (km/s)
        #[arg(long, default_value_t = defaults::DEFAULT_VELOCITY_KM_S)]
        velocity_km_s: f64,
        /// Impact latitude (degrees)
        #[arg(long, default_value_t = defaults::DEFAULT_LATITUDE, allow_hyphen_values = true)]
        latitude: f64,
        /// Impact longitude (degrees)
        #[arg(long, default_value_t = defaults::DEFAULT_LONGITUDE, allow_hyphen_values = true)]
        longitude: f64,
        /// People per km² around the impact site
        #[arg(long, default_value_t = defaults::DEFAULT_POP_DENSITY_PER_KM2)]
        pop_density: f64,
    },

    /// Fetch one page of the NASA NEO browse feed and print it
    Neo {
        /// Zero-based page number
        #[arg(long)]
        page: Option<u32>,
        /// Objects per page
        #[arg(long)]
        size: Option<u32>,
    },
}

/// Output of the `simulate` subcommand
#[derive(Debug, Serialize)]
struct SimulationReport {
    request: ImpactRequest,
    assessment: ImpactAssessment,
}

// ============================================================================
// Startup Helpers
// ============================================================================

/// Check if a store reset is requested via CLI flag or environment variable.
fn should_reset_db(cli_flag: bool) -> bool {
    if cli_flag {
        return true;
    }
    if let Ok(val) = std::env::var("RESET_DB") {
        let val_lower = val.to_lowercase();
        return val_lower == "true" || val_lower == "1" || val_lower == "yes";
    }
    false
}

/// Merge CLI overrides into the loaded config.
fn apply_cli_overrides(config: &mut AppConfig, args: &CliArgs) {
    if let Some(addr) = &args.addr {
        config.server.bind_address.clone_from(addr);
    }
    if let Some(backend) = args.store {
        config.storage.backend = backend;
    }
    if let Some(path) = &args.data_path {
        config.storage.path = Some(path.clone());
    }
}

/// Build the NEO feed if a key is available.
fn build_neo_feed(config: &AppConfig) -> Option<Arc<dyn NeoFeed>> {
    match NeoClient::from_config(&config.nasa) {
        Ok(client) => {
            info!(base_url = client.base_url(), "NEO feed enabled");
            Some(Arc::new(client))
        }
        Err(NeoClientError::MissingApiKey) => None,
        Err(e) => {
            warn!(error = %e, "Failed to build NEO client: feed disabled");
            None
        }
    }
}

// ============================================================================
// Subcommands
// ============================================================================

fn run_simulate(request: ImpactRequest) -> Result<()> {
    request.validate()?;

    let report = SimulationReport {
        request,
        assessment: try_assess_impact(&request)?,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn run_neo(mut config: AppConfig, interactive: bool, query: BrowseQuery) -> Result<()> {
    config::bootstrap_api_key(&mut config.nasa, interactive, Path::new(defaults::DOTENV_PATH));

    let client = NeoClient::from_config(&config.nasa).context("Cannot query the NEO feed")?;
    let asteroids = client
        .browse(&query)
        .await
        .context("Failed to fetch from NASA API")?;

    println!(
        "{}",
        serde_json::to_string_pretty(&NeoFeedResponse::from(asteroids))?
    );
    Ok(())
}

async fn run_server(mut config: AppConfig, interactive: bool, reset: bool) -> Result<()> {
    if reset {
        storage::reset_store_data(&config.storage).context("Failed to reset stored impacts")?;
    }

    config::bootstrap_api_key(&mut config.nasa, interactive, Path::new(defaults::DOTENV_PATH));

    let store = storage::open_store(&config.storage).context("Failed to open impact store")?;
    let state = ApiState::new(store, build_neo_feed(&config));
    let app = create_app(state, &config.server.cors_origins);

    let addr = &config.server.bind_address;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    info!("HTTP server listening on http://{}", addr);

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel_token.cancelled().await })
        .await
        .context("HTTP server error")?;

    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let mut app_config = AppConfig::load();
    apply_cli_overrides(&mut app_config, &args);
    app_config.validate()?;
    if let Ok(toml) = app_config.to_toml() {
        debug!("Effective configuration:\n{}", toml);
    }

    let interactive = !args.no_prompt && std::io::stdin().is_terminal();

    match args.command {
        Some(SubCommand::Simulate {
            diameter_m,
            velocity_km_s,
            latitude,
            longitude,
            pop_density,
        }) => run_simulate(ImpactRequest {
            diameter_m,
            velocity_km_s,
            latitude,
            longitude,
            pop_density_per_km2: pop_density,
        }),
        Some(SubCommand::Neo { page, size }) => {
            run_neo(app_config, interactive, BrowseQuery { page, size }).await
        }
        Some(SubCommand::Serve) | None => {
            info!(
                store = %app_config.storage.backend,
                path = %app_config.storage.resolved_path().display(),
                "Impact Sim starting"
            );
            run_server(app_config, interactive, should_reset_db(args.reset_db)).await?;
            info!("Impact Sim shutdown complete");
            Ok(())
        }
    }
}
