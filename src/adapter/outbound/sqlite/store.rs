//! Trade history reads.
//!
//! Two ways to produce the report: run [`PROGRESS_QUERY`] inside SQLite, or
//! load the table and hand it to [`compute_progress`]. Both return the same
//! rows.

use std::path::Path;

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel::SqliteConnection;
use tracing::{debug, info};

use super::database::connection::open_read_only;
use super::database::model::{ProgressQueryRow, TradeHistoryRow};
use super::database::schema::trade_history;
use crate::config::Engine;
use crate::domain::{compute_progress, ProgressRow, TradeRecord};
use crate::error::Result;

/// The report statement.
///
/// The inner lookup filters on `selling = 0` only, so buys that never
/// completed still serve as baselines. The trailing `id` keys only pin the
/// order of rows whose timestamps are equal.
pub const PROGRESS_QUERY: &str = "\
SELECT th.alt_coin_id AS coin,
       th.alt_trade_amount AS amount,
       th.crypto_trade_amount AS priceInUSD,
       (th.alt_trade_amount - (
           SELECT prev.alt_trade_amount
           FROM trade_history prev
           WHERE prev.alt_coin_id = th.alt_coin_id
             AND prev.datetime < th.datetime
             AND prev.selling = 0
           ORDER BY prev.datetime DESC, prev.id ASC
           LIMIT 1
       )) AS change,
       th.datetime AS datetime
FROM trade_history th
WHERE th.state = 'COMPLETE' AND th.selling = 0
ORDER BY th.datetime DESC, th.id ASC";

/// Read-only view over the bot's `trade_history` table.
pub struct SqliteTradeStore {
    conn: SqliteConnection,
}

impl SqliteTradeStore {
    /// Open the database at `path` read-only.
    ///
    /// # Errors
    /// Returns an error if the file is missing or cannot be opened.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = open_read_only(path)?;
        info!(path = %path.display(), "Opened trade database");
        Ok(Self { conn })
    }

    /// Run the report statement inside SQLite.
    ///
    /// # Errors
    /// Returns an error if the table is missing or the file is not a database.
    pub fn progress_query(&mut self) -> Result<Vec<ProgressRow>> {
        let rows: Vec<ProgressQueryRow> = diesel::sql_query(PROGRESS_QUERY).load(&mut self.conn)?;
        debug!(rows = rows.len(), "Report query finished");
        Ok(rows.into_iter().map(ProgressRow::from).collect())
    }

    /// Load every trade record in row-id order.
    ///
    /// The storage class of each `datetime` is read alongside it, so records
    /// order the same way the column does inside SQLite.
    ///
    /// # Errors
    /// Returns an error if the table is missing or the file is not a database.
    pub fn load_trades(&mut self) -> Result<Vec<TradeRecord>> {
        let rows: Vec<(TradeHistoryRow, String)> = trade_history::table
            .order(trade_history::id.asc())
            .select((
                TradeHistoryRow::as_select(),
                sql::<Text>("typeof(trade_history.datetime)"),
            ))
            .load(&mut self.conn)?;
        debug!(rows = rows.len(), "Loaded trade history");
        Ok(rows
            .into_iter()
            .map(|(row, class)| row.into_record(&class))
            .collect())
    }

    /// Produce the report with the chosen engine.
    ///
    /// # Errors
    /// Propagates any database error; nothing is retried.
    pub fn report(&mut self, engine: Engine) -> Result<Vec<ProgressRow>> {
        match engine {
            Engine::Sql => self.progress_query(),
            Engine::Native => {
                let records = self.load_trades()?;
                Ok(compute_progress(&records))
            }
        }
    }
}
