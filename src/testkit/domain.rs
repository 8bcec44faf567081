//! Builders for trade history rows used across tests.

use crate::adapter::outbound::sqlite::database::model::NewTradeHistoryRow;
use crate::domain::TradeState;

/// Bridge coin used by the fixtures.
pub const BRIDGE: &str = "USDT";

/// A completed buy of `amount` units of `coin` for `price_in_usd`.
pub fn buy(coin: &str, amount: f64, price_in_usd: f64, at: &str) -> NewTradeHistoryRow {
    NewTradeHistoryRow {
        alt_coin_id: Some(coin.to_string()),
        crypto_coin_id: Some(BRIDGE.to_string()),
        selling: Some(false),
        state: Some(TradeState::Complete.as_str().to_string()),
        alt_starting_balance: Some(0.0),
        alt_trade_amount: Some(amount),
        crypto_starting_balance: Some(price_in_usd),
        crypto_trade_amount: Some(price_in_usd),
        datetime: Some(at.to_string()),
    }
}

/// A completed sell of `amount` units of `coin`.
pub fn sell(coin: &str, amount: f64, price_in_usd: f64, at: &str) -> NewTradeHistoryRow {
    NewTradeHistoryRow {
        selling: Some(true),
        alt_starting_balance: Some(amount),
        crypto_starting_balance: Some(0.0),
        ..buy(coin, amount, price_in_usd, at)
    }
}

/// Replace the state of a row.
pub fn with_state(mut row: NewTradeHistoryRow, state: TradeState) -> NewTradeHistoryRow {
    row.state = Some(state.as_str().to_string());
    row
}
