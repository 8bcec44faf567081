//! SQLite database modules.
//!
//! Provides read-only connection setup, the schema of the bot's table, and
//! Diesel model types.

pub mod connection;
pub mod model;
pub mod schema;
