//! MATKA — bet-pattern engine CLI
//!
//! Entry point. Loads configuration, initialises structured logging and
//! runs one engine operation: validate a bet number, declare a result, or
//! settle a batch of pending bets exported by the backend.

use anyhow::Result;
use clap::Parser;
use tracing::warn;

use matka::cli::{self, Args};
use matka::config::AppConfig;

fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let args = Args::parse();

    let config_found = std::path::Path::new(&args.config).exists();
    let cfg = if config_found {
        AppConfig::load(&args.config)?
    } else {
        AppConfig::default()
    };

    init_logging(&cfg);

    if !config_found {
        warn!(path = %args.config, "Config file not found, using standard rates");
    }

    cli::run(args.command, &cfg)
}

/// Initialise the `tracing` subscriber.
fn init_logging(cfg: &AppConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.logging.filter));

    let json_logging = cfg.logging.json || std::env::var("MATKA_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
