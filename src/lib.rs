//! trade-progress - buy-side progress report for a trading bot's history.
//!
//! Reads the `trade_history` table the bot keeps in SQLite and, for every
//! completed buy, shows how much of the coin it yielded compared with the
//! previous buy of that coin.
//!
//! # Modules
//!
//! - [`config`] - Defaults, TOML file and override layering
//! - [`domain`] - Trade records and the lagged `change` computation
//! - [`adapter`] - Read-only SQLite access via Diesel
//! - [`cli`] - Argument parsing, rendering and the report command
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use trade_progress::domain::{compute_progress, TradeRecord};
//!
//! let buy = |id, amount, at: &str| TradeRecord {
//!     id,
//!     coin: Some("ADA".into()),
//!     selling: Some(false),
//!     state: Some("COMPLETE".into()),
//!     amount: Some(amount),
//!     price_in_usd: Some(100.0),
//!     datetime: Some(at.into()),
//! };
//!
//! let rows = compute_progress(&[buy(1, 100.0, "2021-03-01"), buy(2, 120.0, "2021-03-02")]);
//! assert_eq!(rows[0].change, Some(20.0));
//! assert_eq!(rows[1].change, None);
//! ```

pub mod adapter;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
