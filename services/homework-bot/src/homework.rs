//! Homework records: response validation, status catalog and message rendering

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::BotError;

/// Field of the API answer that carries the list of homeworks
pub const HOMEWORKS_KEY: &str = "homeworks";

/// Review status of a homework submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomeworkStatus::Approved => write!(f, "approved"),
            HomeworkStatus::Reviewing => write!(f, "reviewing"),
            HomeworkStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(BotError::UnknownStatus(format!("{:?}", other))),
        }
    }
}

/// Verdict sentence shown for each review status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCatalog {
    #[serde(default = "default_approved")]
    pub approved: String,
    #[serde(default = "default_reviewing")]
    pub reviewing: String,
    #[serde(default = "default_rejected")]
    pub rejected: String,
}

impl Default for StatusCatalog {
    fn default() -> Self {
        Self {
            approved: default_approved(),
            reviewing: default_reviewing(),
            rejected: default_rejected(),
        }
    }
}

impl StatusCatalog {
    pub fn verdict(&self, status: HomeworkStatus) -> &str {
        match status {
            HomeworkStatus::Approved => &self.approved,
            HomeworkStatus::Reviewing => &self.reviewing,
            HomeworkStatus::Rejected => &self.rejected,
        }
    }
}

fn default_approved() -> String {
    "Работа проверена: ревьюеру всё понравилось. Ура!".to_string()
}

fn default_reviewing() -> String {
    "Работа взята на проверку ревьюером.".to_string()
}

fn default_rejected() -> String {
    "Работа проверена: у ревьюера есть замечания.".to_string()
}

/// Extract the list of homeworks from a decoded API answer.
///
/// The list is returned as-is and may be empty; index 0 is the most recent record.
pub fn check_response(response: &Value) -> crate::Result<&[Value]> {
    let object = response
        .as_object()
        .ok_or_else(|| BotError::Shape("not a mapping".to_string()))?;
    let homeworks = object
        .get(HOMEWORKS_KEY)
        .ok_or_else(|| BotError::Shape("missing homeworks key".to_string()))?;
    homeworks
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| BotError::Shape("homeworks not a list".to_string()))
}

/// Render the chat message for one homework record
pub fn build_message(homework: &Value, catalog: &StatusCatalog) -> crate::Result<String> {
    let name = match homework.get("homework_name") {
        None | Some(Value::Null) => return Err(BotError::FieldMissing("homework_name")),
        Some(Value::String(name)) => name.clone(),
        Some(other) => other.to_string(),
    };
    let status = match homework.get("status") {
        None => return Err(BotError::FieldMissing("status")),
        Some(Value::String(status)) => status.parse::<HomeworkStatus>()?,
        Some(other) => return Err(BotError::UnknownStatus(other.to_string())),
    };

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        name,
        catalog.verdict(status)
    ))
}
