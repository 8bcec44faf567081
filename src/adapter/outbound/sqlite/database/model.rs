//! Database model types for Diesel ORM.

use diesel::prelude::*;
use diesel::sql_types::{Double, Nullable, Text};

use super::schema::trade_history;
use crate::domain::{ProgressRow, Timestamp, TradeRecord};

/// Database row for a trade history record (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = trade_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TradeHistoryRow {
    pub id: i32,
    pub alt_coin_id: Option<String>,
    pub crypto_coin_id: Option<String>,
    pub selling: Option<bool>,
    pub state: Option<String>,
    pub alt_starting_balance: Option<f64>,
    pub alt_trade_amount: Option<f64>,
    pub crypto_starting_balance: Option<f64>,
    pub crypto_trade_amount: Option<f64>,
    pub datetime: Option<String>,
}

impl TradeHistoryRow {
    /// Convert to a domain record. `datetime_class` is `typeof(datetime)`
    /// for this row and decides how the timestamp orders.
    #[must_use]
    pub fn into_record(self, datetime_class: &str) -> TradeRecord {
        TradeRecord {
            id: self.id,
            coin: self.alt_coin_id,
            selling: self.selling,
            state: self.state,
            amount: self.alt_trade_amount,
            price_in_usd: self.crypto_trade_amount,
            datetime: self
                .datetime
                .map(|text| Timestamp::from_stored(text, datetime_class)),
        }
    }
}

/// Database row for a trade history record (insertable). Only fixtures write.
#[derive(Insertable, Debug, Clone, Default)]
#[diesel(table_name = trade_history)]
pub struct NewTradeHistoryRow {
    pub alt_coin_id: Option<String>,
    pub crypto_coin_id: Option<String>,
    pub selling: Option<bool>,
    pub state: Option<String>,
    pub alt_starting_balance: Option<f64>,
    pub alt_trade_amount: Option<f64>,
    pub crypto_starting_balance: Option<f64>,
    pub crypto_trade_amount: Option<f64>,
    pub datetime: Option<String>,
}

/// One row returned by the report statement.
#[derive(QueryableByName, Debug, Clone)]
pub struct ProgressQueryRow {
    #[diesel(sql_type = Nullable<Text>)]
    pub coin: Option<String>,
    #[diesel(sql_type = Nullable<Double>)]
    pub amount: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    #[diesel(column_name = "priceInUSD")]
    pub price_in_usd: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub change: Option<f64>,
    #[diesel(sql_type = Nullable<Text>)]
    pub datetime: Option<String>,
}

impl From<ProgressQueryRow> for ProgressRow {
    fn from(row: ProgressQueryRow) -> Self {
        Self {
            coin: row.coin,
            amount: row.amount,
            price_in_usd: row.price_in_usd,
            change: row.change,
            datetime: row.datetime,
        }
    }
}
