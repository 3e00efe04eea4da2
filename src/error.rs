use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing environment variables: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    ConfigValidation(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("review API error: {0}")]
    RemoteApi(String),

    #[error("malformed submission list")]
    MalformedResponse,

    #[error("status format error: {0}")]
    Format(String),

    #[error("notification error: {0}")]
    Notify(String),
}

impl Error {
    /// Startup errors that must terminate the process instead of being
    /// looped past.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::MissingCredentials(_)
                | Error::ConfigNotFound(_)
                | Error::ConfigParse(_)
                | Error::ConfigValidation(_)
                | Error::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
