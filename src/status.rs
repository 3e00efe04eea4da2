use serde_json::Value;
use tracing::{debug, error};

use crate::error::{Error, Result};

/// Review outcome reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    pub fn from_status(status: &str) -> Option<Self> {
        match status {
            "approved" => Some(Verdict::Approved),
            "reviewing" => Some(Verdict::Reviewing),
            "rejected" => Some(Verdict::Rejected),
            _ => None,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Verdict::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Verdict::Reviewing => "Работа взята на проверку ревьюером.",
            Verdict::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// Render the notification text for a submission record.
pub fn parse_status(homework: &Value) -> Result<String> {
    debug!("reading status and verdict");
    let Some(status) = homework.get("status").and_then(Value::as_str) else {
        error!("submission has no status");
        return Err(Error::Format("submission is missing 'status'".to_string()));
    };
    let Some(name) = homework.get("homework_name").and_then(Value::as_str) else {
        error!("submission has no homework_name");
        return Err(Error::Format(
            "submission is missing 'homework_name'".to_string(),
        ));
    };
    let Some(verdict) = Verdict::from_status(status) else {
        error!(status, "unknown review status");
        return Err(Error::Format(format!("unknown review status '{status}'")));
    };

    Ok(format!(
        "Changed review status for \"{name}\". {}",
        verdict.text()
    ))
}
