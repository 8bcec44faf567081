//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`db`] - Fixture databases laid out like the trading bot's.
//! - [`domain`] - Builders for trade history rows.

pub mod db;
pub mod domain;
