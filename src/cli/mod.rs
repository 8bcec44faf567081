//! Command-line interface definitions.

pub mod output;
pub mod report;

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::{Engine, LogFormat, OutputMode, Overrides};
use crate::domain::ReportFilter;

/// Show how much of each coin every completed buy gained over the previous one.
///
/// With no arguments, reads `data/crypto_trading.db` and prints a table.
#[derive(Parser, Debug)]
#[command(name = "progress")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the trading bot's database
    #[arg(short, long, env = "PROGRESS_DATABASE")]
    pub database: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, env = "PROGRESS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output mode
    #[arg(short, long, value_enum)]
    pub mode: Option<OutputMode>,

    /// How the change column is computed
    #[arg(long, value_enum)]
    pub engine: Option<Engine>,

    /// Text shown for missing values
    #[arg(long)]
    pub null_value: Option<String>,

    /// Don't clear the terminal first
    #[arg(long)]
    pub no_clear: bool,

    /// Only show rows for this coin
    #[arg(long)]
    pub coin: Option<String>,

    /// Only show the N most recent rows
    #[arg(short = 'n', long, value_parser = parse_limit)]
    pub limit: Option<usize>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log line format
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Values that override the config file.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            database: self.database.clone(),
            mode: self.mode,
            engine: self.engine,
            null_value: self.null_value.clone(),
            no_clear: self.no_clear,
            verbose: self.verbose,
            log_format: self.log_format,
        }
    }

    #[must_use]
    pub fn filter(&self) -> ReportFilter {
        ReportFilter {
            coin: self.coin.clone(),
            limit: self.limit,
        }
    }
}

fn parse_limit(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".into()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_is_valid() {
        let cli = Cli::try_parse_from(["progress"]).unwrap();
        assert!(cli.config.is_none());
        assert!(!cli.no_clear);
        assert_eq!(cli.filter(), ReportFilter::default());
    }

    #[test]
    fn flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "progress",
            "--database",
            "other.db",
            "--mode",
            "json",
            "--engine",
            "native",
            "--no-clear",
            "-vv",
        ])
        .unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.database, Some(PathBuf::from("other.db")));
        assert_eq!(overrides.mode, Some(OutputMode::Json));
        assert_eq!(overrides.engine, Some(Engine::Native));
        assert!(overrides.no_clear);
        assert_eq!(overrides.verbose, 2);
    }

    #[test]
    fn filter_flags_parse() {
        let cli = Cli::try_parse_from(["progress", "--coin", "ADA", "-n", "5"]).unwrap();
        assert_eq!(
            cli.filter(),
            ReportFilter {
                coin: Some("ADA".into()),
                limit: Some(5),
            }
        );
    }

    #[test]
    fn zero_limit_is_rejected() {
        assert!(Cli::try_parse_from(["progress", "--limit", "0"]).is_err());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["progress", "--mode", "html"]).is_err());
    }
}
