//! Configuration loading.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment and command-line overrides (see [`Overrides`]).

mod logging;

pub use logging::{LogFormat, LoggingConfig};

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Database written by the trading bot, relative to the working directory.
pub const DEFAULT_DATABASE: &str = "data/crypto_trading.db";

/// How the report is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Borderless fixed-width columns with a header row
    #[default]
    Column,
    /// Box-drawing borders
    Box,
    /// Markdown table
    Markdown,
    /// PostgreSQL client style
    Psql,
    /// JSON array of row objects
    Json,
}

/// How the `change` column is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Run the correlated subquery inside SQLite
    #[default]
    Sql,
    /// Load the table and compute the lagged lookup in process
    Native,
}

/// Report output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub mode: OutputMode,
    /// Text printed for NULL values.
    pub null_value: String,
    /// Clear the terminal before printing.
    pub clear: bool,
    pub engine: Engine,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::Column,
            null_value: String::new(),
            clear: true,
            engine: Engine::Sql,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub database: PathBuf,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database: Option<PathBuf>,
    pub mode: Option<OutputMode>,
    pub engine: Option<Engine>,
    pub null_value: Option<String>,
    pub no_clear: bool,
    pub verbose: u8,
    pub log_format: Option<LogFormat>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Parse configuration from TOML text. Missing keys keep their defaults.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the effective configuration: file (if any), then overrides.
    pub fn resolve(path: Option<&Path>, overrides: Overrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides in place.
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(database) = overrides.database {
            self.database = database;
        }
        if let Some(mode) = overrides.mode {
            self.output.mode = mode;
        }
        if let Some(engine) = overrides.engine {
            self.output.engine = engine;
        }
        if let Some(null_value) = overrides.null_value {
            self.output.null_value = null_value;
        }
        if overrides.no_clear {
            self.output.clear = false;
        }
        if let Some(format) = overrides.log_format {
            self.logging.format = format;
        }
        self.logging.raise_verbosity(overrides.verbose);
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database",
                reason: "path cannot be empty".into(),
            });
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "logging.level",
            });
        }
        Ok(())
    }
}
