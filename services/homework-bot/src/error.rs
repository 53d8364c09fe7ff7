//! Error types for the homework bot

/// Errors that can occur while polling and notifying
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// The review API answered with something other than 200 OK
    #[error("API returned status {status}, expected 200")]
    HttpStatus { status: u16 },

    /// Network or decoding failure while talking to the review API
    #[error("{0}")]
    Transport(String),

    /// The API answer does not have the expected shape
    #[error("Unexpected API response: {0}")]
    Shape(String),

    #[error("Homework record has no '{0}' field")]
    FieldMissing(&'static str),

    #[error("Unknown homework status: {0}")]
    UnknownStatus(String),

    /// The chat message could not be delivered
    #[error("Message is not sent: {0}")]
    Delivery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for homework bot operations
pub type Result<T> = std::result::Result<T, BotError>;
