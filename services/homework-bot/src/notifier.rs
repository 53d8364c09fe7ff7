//! Notifier trait and duplicate suppression

use async_trait::async_trait;

use crate::state::PollState;

/// Trait for delivering a text message to the fixed chat destination
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Send a text message.
    ///
    /// Repeated calls with identical text produce repeated messages.
    async fn notify(&self, text: &str) -> crate::Result<()>;
}

/// Send `text` unless it equals the last delivered message.
///
/// Returns the text so the caller can record it as delivered. A failed
/// delivery is propagated and must not be recorded.
pub async fn notify_once(
    notifier: &dyn Notifier,
    text: &str,
    state: &PollState,
) -> crate::Result<String> {
    if state.already_sent(text) {
        tracing::debug!("Skipping repeated message via '{}'", notifier.type_name());
        return Ok(text.to_string());
    }

    notifier.notify(text).await?;
    tracing::info!("Message does not repeat");
    Ok(text.to_string())
}
