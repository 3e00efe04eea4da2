use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::cli::Cli;
use crate::credentials::Credentials;
use crate::error::{Error, Result};

pub const DEFAULT_CONFIG_PATH: &str = "homework-bot.toml";
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_POLL_SECONDS: u64 = 600;
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub endpoint: Option<String>,
    pub telegram_api_url: Option<String>,
    pub poll_interval: Option<u64>,
    pub request_timeout: Option<u64>,
    pub from_date: Option<i64>,
    pub advance_cursor: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub credentials: Credentials,
    pub endpoint: String,
    pub telegram_api_url: String,
    pub poll_seconds: u64,
    pub request_timeout: u64,
    pub from_date: i64,
    pub advance_cursor: bool,
    pub once: bool,
    pub max_cycles: Option<u32>,
}

impl Config {
    /// Build the config from the CLI, the optional config file and the
    /// environment. Credentials are read here but checked separately.
    pub fn load(cli: &Cli) -> Result<Self> {
        let file_config = match cli.config.as_deref() {
            Some(path) => read_config_file(Path::new(path))?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    read_config_file(default_path)?
                } else {
                    ConfigFile::default()
                }
            }
        };

        let config = merge(file_config, cli, Credentials::from_env());
        validate_merged(&config)?;
        Ok(config)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Err(Error::ConfigNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<ConfigFile> {
    let config: ConfigFile = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ConfigFile) -> Result<()> {
    if let Some(interval) = config.poll_interval
        && interval == 0
    {
        return Err(Error::ConfigValidation(
            "poll_interval must be > 0".to_string(),
        ));
    }
    if let Some(timeout) = config.request_timeout
        && timeout == 0
    {
        return Err(Error::ConfigValidation(
            "request_timeout must be > 0".to_string(),
        ));
    }
    if let Some(from_date) = config.from_date
        && from_date < 0
    {
        return Err(Error::ConfigValidation(
            "from_date must be >= 0".to_string(),
        ));
    }
    for (name, url) in [
        ("endpoint", &config.endpoint),
        ("telegram_api_url", &config.telegram_api_url),
    ] {
        if let Some(url) = url {
            validate_url(name, url)?;
        }
    }
    Ok(())
}

/// Checks applied after CLI overrides, which bypass the file validation.
fn validate_merged(config: &Config) -> Result<()> {
    if config.poll_seconds == 0 {
        return Err(Error::ConfigValidation(
            "poll interval must be > 0".to_string(),
        ));
    }
    if config.request_timeout == 0 {
        return Err(Error::ConfigValidation(
            "request timeout must be > 0".to_string(),
        ));
    }
    if config.from_date < 0 {
        return Err(Error::ConfigValidation(
            "from_date must be >= 0".to_string(),
        ));
    }
    validate_url("endpoint", &config.endpoint)
}

fn validate_url(name: &str, url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(Error::ConfigValidation(format!(
            "{name} must be an http(s) URL, got '{url}'"
        )))
    }
}

pub fn merge(file: ConfigFile, cli: &Cli, credentials: Credentials) -> Config {
    Config {
        credentials,
        endpoint: cli
            .endpoint
            .clone()
            .or(file.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        telegram_api_url: file
            .telegram_api_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
        poll_seconds: cli
            .poll_seconds
            .or(file.poll_interval)
            .unwrap_or(DEFAULT_POLL_SECONDS),
        request_timeout: cli
            .request_timeout
            .or(file.request_timeout)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        from_date: cli.from_date.or(file.from_date).unwrap_or(0),
        advance_cursor: cli.advance_cursor || file.advance_cursor.unwrap_or(false),
        once: cli.once,
        max_cycles: cli.max_cycles,
    }
}
