//! Poll loop state

/// State carried between ticks of the poll loop.
///
/// Lives only for the process lifetime; a restart begins from "now" with no
/// remembered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    /// Unix seconds passed as `from_date` on the next fetch
    pub last_polled_timestamp: i64,
    /// Text of the most recent successfully delivered message
    pub last_sent_text: String,
}

impl PollState {
    pub fn new(now: i64) -> Self {
        Self {
            last_polled_timestamp: now,
            last_sent_text: String::new(),
        }
    }

    /// Whether `text` repeats the last delivered message
    pub fn already_sent(&self, text: &str) -> bool {
        self.last_sent_text == text
    }
}
