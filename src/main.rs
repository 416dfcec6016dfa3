//! Local Library server.
//!
//! Main entry point: loads configuration, initializes logging and starts
//! the HTTP server.

use tracing_subscriber::{EnvFilter, fmt};

use library_core::config::AppConfig;
use library_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e.detail(), "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment.
///
/// `LIBRARY_CONFIG` names an explicit file; otherwise `LIBRARY_ENV`
/// (default `development`) selects the overlay.
fn load_configuration() -> Result<AppConfig, AppError> {
    if let Ok(path) = std::env::var("LIBRARY_CONFIG") {
        return AppConfig::from_file(&path);
    }
    let env = std::env::var("LIBRARY_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        mode = %config.server.mode,
        "Starting Local Library"
    );
    library_api::run_server(config).await
}
