use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    #[diagnostic(code(progress::config::missing))]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    #[diagnostic(code(progress::config::invalid))]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    #[diagnostic(code(progress::config::read))]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    #[diagnostic(code(progress::config::parse))]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("database file not found: {}", path.display())]
    #[diagnostic(
        code(progress::database::missing),
        help("run the trading bot first, or point --database at an existing file")
    )]
    DatabaseNotFound { path: PathBuf },

    #[error("connection error: {0}")]
    #[diagnostic(code(progress::database::connection))]
    Connection(String),

    #[error("query failed: {0}")]
    #[diagnostic(code(progress::database::query))]
    Query(#[from] diesel::result::Error),

    #[error("IO error: {0}")]
    #[diagnostic(code(progress::io))]
    Io(#[from] std::io::Error),

    #[error("JSON encoding error: {0}")]
    #[diagnostic(code(progress::json))]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<diesel::ConnectionError> for Error {
    fn from(err: diesel::ConnectionError) -> Self {
        Error::Connection(err.to_string())
    }
}
