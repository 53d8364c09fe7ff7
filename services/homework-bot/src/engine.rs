//! Engine: the fetch, validate, render, notify poll loop

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::fetcher::StatusSource;
use crate::homework::{build_message, check_response, StatusCatalog};
use crate::notifier::{notify_once, Notifier};
use crate::state::PollState;
use crate::BotError;

/// The engine owns the poll state and drives one tick at a time
pub struct Engine {
    source: Arc<dyn StatusSource>,
    notifier: Arc<dyn Notifier>,
    catalog: StatusCatalog,
    interval: Duration,
    state: PollState,
    cancel: CancellationToken,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("interval", &self.interval)
            .field("state", &self.state)
            .finish()
    }
}

impl Engine {
    pub fn new(
        source: Arc<dyn StatusSource>,
        notifier: Arc<dyn Notifier>,
        config: &Config,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            source,
            notifier,
            catalog: config.statuses.clone(),
            interval: Duration::from_secs(config.poll.interval_seconds),
            state: PollState::new(current_epoch_seconds()),
            cancel,
        }
    }

    /// Replace the initial poll state
    pub fn with_state(mut self, state: PollState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Run a single poll: fetch, validate, render and notify.
    ///
    /// The "since" timestamp only advances when the whole tick succeeds.
    pub async fn tick(&mut self) -> crate::Result<()> {
        let response = self.source.fetch(self.state.last_polled_timestamp).await?;
        let homeworks = check_response(&response)?;

        match homeworks.first() {
            Some(homework) => {
                let message = build_message(homework, &self.catalog)?;
                if !self.state.already_sent(&message) {
                    self.state.last_sent_text =
                        notify_once(self.notifier.as_ref(), &message, &self.state).await?;
                }
            }
            None => tracing::debug!("There are no new statuses"),
        }

        self.state.last_polled_timestamp = current_epoch_seconds();
        Ok(())
    }

    /// Log a failed tick and report it to the chat.
    ///
    /// An error here means the crash report itself could not be delivered.
    pub async fn report_crash(&mut self, error: &BotError) -> crate::Result<()> {
        let message = format!("Program crash: {}", error);
        tracing::error!("{}", message);

        if !self.state.already_sent(&message) {
            self.state.last_sent_text =
                notify_once(self.notifier.as_ref(), &message, &self.state).await?;
        }
        Ok(())
    }

    /// Poll until cancelled. Returns an error only when a crash report
    /// cannot be delivered.
    pub async fn run(&mut self) -> crate::Result<()> {
        tracing::debug!(
            "Polling every {:?} starting from {}",
            self.interval,
            self.state.last_polled_timestamp
        );

        loop {
            match self.tick().await {
                Ok(()) => tracing::info!("There are no errors"),
                Err(e) => {
                    if let Err(fatal) = self.report_crash(&e).await {
                        tracing::error!(
                            severity = "critical",
                            "Crash report could not be delivered: {}",
                            fatal
                        );
                        return Err(fatal);
                    }
                }
            }

            // Wait for the next poll or cancellation
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Poll loop cancelled");
                    break;
                }
            }
        }

        Ok(())
    }
}

fn current_epoch_seconds() -> i64 {
    chrono::Utc::now().timestamp()
}
