//! Fixture databases laid out like the trading bot's.

use std::path::{Path, PathBuf};

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::adapter::outbound::sqlite::database::model::NewTradeHistoryRow;
use crate::adapter::outbound::sqlite::database::schema::trade_history;

/// The bot's DDL for `trade_history`.
pub const TRADE_HISTORY_DDL: &str = "\
CREATE TABLE trade_history (
    id INTEGER NOT NULL,
    alt_coin_id VARCHAR,
    crypto_coin_id VARCHAR,
    selling BOOLEAN,
    state VARCHAR(8),
    alt_starting_balance FLOAT,
    alt_trade_amount FLOAT,
    crypto_starting_balance FLOAT,
    crypto_trade_amount FLOAT,
    datetime DATETIME,
    PRIMARY KEY (id)
)";

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::Integer)]
    #[diesel(column_name = "id")]
    id: i32,
}

/// Writable SQLite file holding a `trade_history` table.
pub struct FixtureDb {
    path: PathBuf,
    conn: SqliteConnection,
}

impl FixtureDb {
    /// Create the database file at `path` with an empty `trade_history`.
    pub fn create(path: &Path) -> Self {
        let mut db = Self::create_without_table(path);
        diesel::sql_query(TRADE_HISTORY_DDL)
            .execute(&mut db.conn)
            .expect("create trade_history");
        db
    }

    /// Create a valid but empty database file at `path`.
    pub fn create_without_table(path: &Path) -> Self {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create fixture directory");
        }
        let url = path.to_string_lossy().into_owned();
        let mut conn = SqliteConnection::establish(&url).expect("open fixture database");
        // Force the file header to be written.
        diesel::sql_query("PRAGMA user_version = 1")
            .execute(&mut conn)
            .expect("initialize fixture database");
        Self {
            path: path.to_path_buf(),
            conn,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert one row and return its id.
    pub fn insert(&mut self, row: &NewTradeHistoryRow) -> i32 {
        diesel::insert_into(trade_history::table)
            .values(row)
            .execute(&mut self.conn)
            .expect("insert trade_history row");

        diesel::sql_query("SELECT last_insert_rowid() AS id")
            .get_result::<LastInsertRowId>(&mut self.conn)
            .expect("read inserted row id")
            .id
    }

    /// Insert rows in order.
    pub fn insert_all(&mut self, rows: &[NewTradeHistoryRow]) {
        for row in rows {
            self.insert(row);
        }
    }

    /// Hold an exclusive lock until this fixture is dropped. Other
    /// connections then fail to read the file.
    pub fn lock_exclusive(&mut self) {
        self.execute("BEGIN EXCLUSIVE");
    }

    /// Run arbitrary SQL, for rows the builders cannot express.
    pub fn execute(&mut self, sql: &str) {
        diesel::sql_query(sql)
            .execute(&mut self.conn)
            .expect("execute fixture sql");
    }
}
