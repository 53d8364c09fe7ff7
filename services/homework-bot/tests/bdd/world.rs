//! BDD test world for the homework bot

use std::io;
use std::sync::{Arc, Mutex};

use cucumber::World;
use serde_json::Value;
use tokio::sync::RwLock;

use homework_bot::engine::Engine;
use homework_bot::io::{HttpClient, HttpResponse};
use homework_bot::state::PollState;
use homework_bot::telegram::TelegramNotifier;
use homework_bot::{BotError, Config};

/// Timestamp every scripted poll loop starts from
pub const INITIAL_TIMESTAMP: i64 = 1_700_000_000;

/// What the fake review API does on GET
#[derive(Debug, Clone)]
pub enum ApiReply {
    Answer { status: u16, body: String },
    Fail(String),
}

/// HTTP client that scripts the review API and records Telegram messages
#[derive(Debug)]
pub struct FakeHttpClient {
    pub api_reply: RwLock<ApiReply>,
    pub telegram_status: RwLock<u16>,
    pub requested_since: RwLock<Vec<String>>,
    pub messages: RwLock<Vec<String>>,
    pub posts: RwLock<usize>,
}

impl Default for FakeHttpClient {
    fn default() -> Self {
        Self {
            api_reply: RwLock::new(ApiReply::Answer {
                status: 200,
                body: r#"{"homeworks": []}"#.to_string(),
            }),
            telegram_status: RwLock::new(200),
            requested_since: RwLock::new(Vec::new()),
            messages: RwLock::new(Vec::new()),
            posts: RwLock::new(0),
        }
    }
}

impl FakeHttpClient {
    pub async fn request_count(&self) -> usize {
        self.requested_since.read().await.len() + *self.posts.read().await
    }
}

#[async_trait::async_trait]
impl HttpClient for FakeHttpClient {
    async fn get(
        &self,
        _url: &str,
        query: &[(&str, &str)],
        _headers: &[(&str, &str)],
    ) -> homework_bot::Result<HttpResponse> {
        let since = query
            .iter()
            .find(|(name, _)| *name == "from_date")
            .map(|(_, value)| value.to_string())
            .unwrap_or_default();
        self.requested_since.write().await.push(since);

        match self.api_reply.read().await.clone() {
            ApiReply::Answer { status, body } => Ok(HttpResponse { status, body }),
            ApiReply::Fail(message) => Err(BotError::Transport(message)),
        }
    }

    async fn post_json(&self, _url: &str, body: &Value) -> homework_bot::Result<HttpResponse> {
        *self.posts.write().await += 1;
        let status = *self.telegram_status.read().await;
        if status == 200 {
            let text = body["text"].as_str().unwrap_or_default().to_string();
            self.messages.write().await.push(text);
        }
        Ok(HttpResponse {
            status,
            body: r#"{"ok":true}"#.to_string(),
        })
    }
}

/// Log sink shared with a scoped tracing subscriber
#[derive(Debug, Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        let capture = self.clone();
        tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || capture.clone())
            .finish()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Default, World)]
pub struct BotWorld {
    // Message building
    pub homework: Option<Value>,
    pub message_result: Option<homework_bot::Result<String>>,
    pub answer: Option<Value>,
    pub validation_result: Option<homework_bot::Result<usize>>,

    // Notification
    pub http: Arc<FakeHttpClient>,
    pub notifier: Option<TelegramNotifier>,
    pub poll_state: Option<PollState>,
    pub delivery_result: Option<homework_bot::Result<()>>,

    // Poll loop
    pub config: Config,
    pub engine: Option<Engine>,
    pub run_result: Option<homework_bot::Result<()>>,
    pub logs: LogCapture,
}
