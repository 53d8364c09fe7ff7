//! Homework bot daemon
//!
//! Reads credentials from the environment (or a `.env` file) and polls forever.

use std::path::PathBuf;

use clap::Parser;
use homework_bot::{load_config, logging, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(about = "Relays homework review status changes to Telegram")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "debug")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let dotenv = dotenvy::dotenv();

    let mut config = match &args.config {
        Some(config_path) => load_config(config_path)?,
        None => Config::default(),
    };

    let _log_guard = logging::init(&config.logging, args.log_level)?;

    tracing::debug!(
        "Parsed command line arguments: config={:?}, log_level={:?}",
        args.config,
        args.log_level
    );
    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {:?}", path),
        Err(e) => tracing::debug!("No .env file loaded: {}", e),
    }

    config.resolve_secrets();

    tracing::info!("Starting homework bot");
    homework_bot::run(config).await?;

    Ok(())
}
