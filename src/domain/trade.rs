//! Trade history records as written by the trading bot.
//!
//! Every column except the row id may be NULL in the bot's schema, so the
//! fields mirror that with `Option`.

use std::cmp::Ordering;
use std::str::FromStr;

/// Lifecycle state of a trade attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeState {
    Starting,
    Ordered,
    Complete,
}

impl TradeState {
    /// Stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TradeState::Starting => "STARTING",
            TradeState::Ordered => "ORDERED",
            TradeState::Complete => "COMPLETE",
        }
    }
}

impl FromStr for TradeState {
    type Err = String;

    /// Exact match only; the database compares states case-sensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STARTING" => Ok(TradeState::Starting),
            "ORDERED" => Ok(TradeState::Ordered),
            "COMPLETE" => Ok(TradeState::Complete),
            other => Err(format!("unknown trade state '{other}'")),
        }
    }
}

/// A stored `datetime` value, ordered the way SQLite orders it.
///
/// The column has NUMERIC affinity, so a value may be stored as a number or
/// as text. Numbers compare numerically and sort before any text; text
/// compares bytewise.
#[derive(Debug, Clone)]
pub enum Timestamp {
    Numeric { value: f64, text: String },
    Text(String),
}

impl Timestamp {
    /// Build from the value's text form and its `typeof()` storage class.
    #[must_use]
    pub fn from_stored(text: String, storage_class: &str) -> Self {
        match storage_class {
            "integer" | "real" => match text.parse::<f64>() {
                Ok(value) => Timestamp::Numeric { value, text },
                Err(_) => Timestamp::Text(text),
            },
            _ => Timestamp::Text(text),
        }
    }

    /// Text as SQLite renders the value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Timestamp::Numeric { text, .. } | Timestamp::Text(text) => text,
        }
    }
}

impl From<&str> for Timestamp {
    fn from(text: &str) -> Self {
        Timestamp::Text(text.to_string())
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Timestamp::Numeric { value: a, .. }, Timestamp::Numeric { value: b, .. }) => {
                a.total_cmp(b)
            }
            (Timestamp::Numeric { .. }, Timestamp::Text(_)) => Ordering::Less,
            (Timestamp::Text(_), Timestamp::Numeric { .. }) => Ordering::Greater,
            (Timestamp::Text(a), Timestamp::Text(b)) => a.as_bytes().cmp(b.as_bytes()),
        }
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Timestamp {}

/// One row of `trade_history`, reduced to the columns the report reads.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TradeRecord {
    pub id: i32,
    /// Traded asset (`alt_coin_id`).
    pub coin: Option<String>,
    pub selling: Option<bool>,
    /// Raw state text; unknown values are kept so they simply never match.
    pub state: Option<String>,
    /// Traded-asset amount (`alt_trade_amount`).
    pub amount: Option<f64>,
    /// Quote-currency amount (`crypto_trade_amount`).
    pub price_in_usd: Option<f64>,
    pub datetime: Option<Timestamp>,
}

impl TradeRecord {
    /// Parsed state, if the stored text is a known state.
    #[must_use]
    pub fn trade_state(&self) -> Option<TradeState> {
        self.state.as_deref().and_then(|s| s.parse().ok())
    }

    /// Buy-direction trade (`selling = 0`). NULL is neither buy nor sell.
    #[must_use]
    pub fn is_buy(&self) -> bool {
        self.selling == Some(false)
    }

    /// Completed buy: the rows the report lists.
    #[must_use]
    pub fn is_completed_buy(&self) -> bool {
        self.is_buy() && self.trade_state() == Some(TradeState::Complete)
    }
}
