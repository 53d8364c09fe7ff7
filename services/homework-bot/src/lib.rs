//! Homework bot - review status notifier
//!
//! Polls the homework review API, detects status changes of the latest
//! submission, and relays them to a Telegram chat.

pub mod config;
pub mod engine;
pub mod error;
pub mod fetcher;
pub mod homework;
pub mod io;
pub mod logging;
pub mod notifier;
pub mod state;
pub mod telegram;

pub use config::{load_config, Config};
pub use error::{BotError, Result};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::engine::Engine;
use crate::fetcher::{PracticumFetcher, StatusSource};
use crate::io::{HttpClient, ReqwestHttpClient};
use crate::notifier::Notifier;
use crate::telegram::TelegramNotifier;

/// Run the homework bot with the given configuration
pub async fn run(config: Config) -> Result<()> {
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    let cancel = CancellationToken::new();

    // Setup shutdown handler
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            cancel_for_signal.cancel();
        }
    });

    start(&config, http, cancel).await
}

/// Check the required settings and poll until cancelled.
///
/// Returns `Ok` without touching the network when a required value is
/// missing; the problem is reported through the log.
pub async fn start(
    config: &Config,
    http: Arc<dyn HttpClient>,
    cancel: CancellationToken,
) -> Result<()> {
    let missing = config.missing_secrets();
    if !missing.is_empty() {
        tracing::error!(
            severity = "critical",
            "Environment variables error: missing {}",
            missing.join(", ")
        );
        return Ok(());
    }

    let source: Arc<dyn StatusSource> =
        Arc::new(PracticumFetcher::new(&config.api, Arc::clone(&http)));
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(&config.telegram, http));

    let mut engine = Engine::new(source, notifier, config, cancel);

    tracing::info!("Homework bot started");
    engine.run().await?;
    tracing::info!("Homework bot stopped");

    Ok(())
}
