//! AW3 Demo Request Intake Service
//!
//! Accepts demo requests over HTTP and sees each one through the intake
//! pipeline:
//! - field validation and normalization
//! - sliding-window rate limiting per IP and per email
//! - 30-day duplicate suppression
//! - dual-path persistence (append-only log + in-process cache)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::info;

use api::{router, AppState};
use intake_service::{start_sweep, IntakeCoordinator, RateLimiter, SweepConfig};
use intake_store::{RequestStore, StoreConfig};
use telemetry::init_tracing_from_env;

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    #[serde(default)]
    store: StoreConfig,

    #[serde(default)]
    sweep: SweepConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            store: StoreConfig::default(),
            sweep: SweepConfig::default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing_from_env();

    info!("Starting Demo Intake Service v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = load_config()?;

    info!(
        store_path = %config.store.path.display(),
        sweep_interval_secs = config.sweep.interval_secs,
        "Loaded configuration"
    );

    // Open the request store; the durable log file is created lazily on the
    // first write, so a missing or read-only path is not a startup error.
    let store = Arc::new(RequestStore::new(config.store.clone()));

    // Rate limiter with its hourly sweep task
    let limiter = Arc::new(RateLimiter::new());
    let sweep_handle = start_sweep(limiter.clone(), config.sweep.clone());

    // Coordinator and application state
    let coordinator = Arc::new(IntakeCoordinator::new(store, limiter));
    let state = AppState::new(coordinator);

    // Create router
    let app = router(state);

    // Start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down...");
    sweep_handle.abort();

    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("INTAKE")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Manual overrides for nested config from environment
    // The config crate's nested parsing doesn't work reliably with underscored field names
    if let Ok(path) = std::env::var("INTAKE_STORE_PATH") {
        config.store.path = path.into();
    }
    if let Ok(interval) = std::env::var("INTAKE_SWEEP_INTERVAL_SECS") {
        config.sweep.interval_secs = interval
            .parse()
            .context("INTAKE_SWEEP_INTERVAL_SECS must be an integer")?;
    }

    Ok(config)
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
