//! SQLite access to the trading bot's database.

pub mod database;
pub mod store;

pub use store::{SqliteTradeStore, PROGRESS_QUERY};
