//! dnsyncd - DNS record synchronizer daemon
//!
//! A thin integration layer: read configuration, build the provider client,
//! IP resolver and reconciler, and hand off to one of two triggers. All
//! reconciliation logic lives in dnsync-core.
//!
//! ## Modes
//!
//! - No arguments: HTTP server on port 1338 accepting `POST /` with a
//!   shared-secret `Authorization` header and a `{"records": [...]}` body.
//! - One positional argument (a file path): poller mode, reconciling that
//!   JSON file at startup and every 60 seconds thereafter.
//!
//! ## Configuration
//!
//! Environment variables, optionally seeded from a `.env` file:
//!
//! ```bash
//! export CLOUDFLARE_API_TOKEN=your_token
//! export CLOUDFLARE_ZONE_ID=your_zone_id
//! export AUTH_HEADER=your_shared_secret   # server mode only
//!
//! dnsyncd                  # HTTP server
//! dnsyncd records.json     # file poller
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use dnsync_core::Reconciler;
use dnsync_ip_http::HttpIpResolver;
use dnsync_provider_cloudflare::CloudflareProvider;

mod config;
mod poller;
mod server;

use config::Config;

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum SyncExitCode {
    CleanShutdown = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<SyncExitCode> for ExitCode {
    fn from(code: SyncExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Trigger mode, selected by the presence of a positional argument
enum Mode {
    /// HTTP server on the fixed port
    Server,
    /// Periodic reconciliation of a local record file
    Poller(PathBuf),
}

fn main() -> ExitCode {
    // Seed the environment from a local dotfile if one exists.
    if dotenvy::dotenv().is_err() {
        eprintln!("Skipping .env file");
    }

    let mode = match std::env::args().nth(1) {
        Some(path) => Mode::Poller(PathBuf::from(path)),
        None => Mode::Server,
    };

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return SyncExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate(matches!(mode, Mode::Server)) {
        eprintln!("Configuration validation error: {e}");
        return SyncExitCode::ConfigError.into();
    }

    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
        return SyncExitCode::ConfigError.into();
    }

    info!("starting dnsyncd");

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("failed to create tokio runtime: {e}");
            return SyncExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        match run(config, mode).await {
            Ok(()) => SyncExitCode::CleanShutdown,
            Err(e) => {
                error!("daemon error: {e:#}");
                SyncExitCode::RuntimeError
            }
        }
    })
    .into()
}

async fn run(config: Config, mode: Mode) -> Result<()> {
    let provider = Arc::new(CloudflareProvider::new(&config.api_token, &config.zone_id)?);
    let resolver = Arc::new(HttpIpResolver::new(&config.ip_echo_url));
    let reconciler = Arc::new(Reconciler::new(resolver, provider));

    match mode {
        Mode::Server => {
            // validate() guarantees the secret is present in server mode.
            let auth_token = config.auth_token.unwrap_or_default();
            server::run(reconciler, auth_token).await
        }
        Mode::Poller(path) => poller::run(reconciler, &path).await,
    }
}
