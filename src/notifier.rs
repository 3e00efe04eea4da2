use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Delivery channel for notification text.
pub trait Notifier {
    fn send(&self, text: &str) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct TgResponse {
    ok: bool,
    description: Option<String>,
}

/// Sends messages to one chat through the Telegram Bot API.
pub struct TelegramNotifier {
    agent: ureq::Agent,
    api_url: String,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(api_url: &str, token: &str, chat_id: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            chat_id: chat_id.trim().to_string(),
        }
    }

    /// Error text with the bot token scrubbed; ureq includes the URL.
    fn scrub(&self, message: String) -> String {
        message.replace(&self.token, "<token>")
    }

    fn chat_id_value(&self) -> serde_json::Value {
        match self.chat_id.parse::<i64>() {
            Ok(id) => serde_json::Value::from(id),
            Err(_) => serde_json::Value::from(self.chat_id.clone()),
        }
    }
}

impl Notifier for TelegramNotifier {
    fn send(&self, text: &str) -> Result<()> {
        debug!(chat_id = %self.chat_id, "sending message");
        let url = format!("{}/bot{}/sendMessage", self.api_url, self.token);
        let body = serde_json::json!({
            "chat_id": self.chat_id_value(),
            "text": text,
        });

        let response = match self.agent.post(&url).send_json(&body) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let detail = response
                    .into_json::<TgResponse>()
                    .ok()
                    .and_then(|r| r.description)
                    .unwrap_or_else(|| "no description".to_string());
                return Err(Error::Notify(format!(
                    "sendMessage returned status {code}: {detail}"
                )));
            }
            Err(e) => {
                return Err(Error::Notify(
                    self.scrub(format!("sendMessage request failed: {e}")),
                ));
            }
        };

        let parsed: TgResponse = response
            .into_json()
            .map_err(|e| Error::Notify(format!("failed to parse sendMessage response: {e}")))?;
        if !parsed.ok {
            return Err(Error::Notify(
                parsed
                    .description
                    .unwrap_or_else(|| "sendMessage failed".to_string()),
            ));
        }

        debug!("message sent");
        Ok(())
    }
}
