use std::fmt;

use regex::Regex;

use crate::error::{Error, Result};

pub const PRACTICUM_TOKEN_ENV: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_ENV: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_ENV: &str = "TELEGRAM_CHAT_ID";

/// The three secrets the bot needs. Values are kept out of `Debug` output.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub chat_id: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &redact(&self.practicum_token))
            .field("telegram_token", &redact(&self.telegram_token))
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() { "<empty>" } else { "<redacted>" }
}

impl Credentials {
    /// Read credentials from the process environment. Unset variables become
    /// empty strings so that `check` reports all of them at once.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).unwrap_or_default();
        Self {
            practicum_token: var(PRACTICUM_TOKEN_ENV),
            telegram_token: var(TELEGRAM_TOKEN_ENV),
            chat_id: var(TELEGRAM_CHAT_ID_ENV),
        }
    }

    /// Fail unless every credential is present and the chat id is well formed.
    pub fn check(&self) -> Result<()> {
        let missing: Vec<&'static str> = [
            (PRACTICUM_TOKEN_ENV, &self.practicum_token),
            (TELEGRAM_TOKEN_ENV, &self.telegram_token),
            (TELEGRAM_CHAT_ID_ENV, &self.chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(Error::MissingCredentials(missing));
        }

        // Numeric id (negative for groups) or a public @channel username.
        let chat_re = Regex::new(r"^(-?\d+|@[A-Za-z][A-Za-z0-9_]{4,})$")
            .map_err(|e| Error::ConfigValidation(format!("chat id pattern: {e}")))?;
        if !chat_re.is_match(self.chat_id.trim()) {
            return Err(Error::ConfigValidation(format!(
                "{TELEGRAM_CHAT_ID_ENV} must be a numeric id or @channel name, got '{}'",
                self.chat_id
            )));
        }

        Ok(())
    }
}
