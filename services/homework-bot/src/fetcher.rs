//! Homework review API client

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::io::HttpClient;
use crate::BotError;

/// Source of homework status answers
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait StatusSource: Send + Sync {
    /// Fetch the statuses changed since `from_date` (unix seconds)
    async fn fetch(&self, from_date: i64) -> crate::Result<Value>;
}

/// Fetches homework statuses from the Practicum review API
pub struct PracticumFetcher {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumFetcher")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumFetcher {
    pub fn new(config: &ApiConfig, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PracticumFetcher for {}", config.endpoint);
        Self {
            endpoint: config.endpoint.clone(),
            authorization: format!("OAuth {}", config.token),
            http,
        }
    }
}

#[async_trait]
impl StatusSource for PracticumFetcher {
    async fn fetch(&self, from_date: i64) -> crate::Result<Value> {
        let from_date = from_date.to_string();
        let response = self
            .http
            .get(
                &self.endpoint,
                &[("from_date", from_date.as_str())],
                &[("Authorization", self.authorization.as_str())],
            )
            .await?;

        if response.status != 200 {
            tracing::debug!("Non-200 response from review API: {}", response.status);
            return Err(BotError::HttpStatus {
                status: response.status,
            });
        }

        serde_json::from_str(&response.body)
            .map_err(|e| BotError::Transport(format!("Failed to decode API answer: {}", e)))
    }
}
