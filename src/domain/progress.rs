//! Buy-side progress: how much of each coin every completed buy yielded
//! compared with the previous buy of the same coin.
//!
//! [`compute_progress`] is the in-process form of the report query. It is a
//! lag over a per-coin partition:
//!
//! - primary rows are completed buys (`state = 'COMPLETE'`, `selling = 0`);
//! - the baseline for a row is the latest buy of the same coin with a strictly
//!   earlier timestamp, in any state;
//! - `change` is the row amount minus the baseline amount, or `None` when
//!   either side is missing.
//!
//! Rows come out newest first. Timestamps order as SQLite orders the
//! column: numbers before text. NULL timestamps sort last, equal timestamps
//! keep row-id order, and among baselines sharing a timestamp the lowest row
//! id wins. These are the orderings SQLite produces for the same statement.

use std::collections::HashMap;

use serde::Serialize;

use super::trade::TradeRecord;

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProgressRow {
    pub coin: Option<String>,
    pub amount: Option<f64>,
    #[serde(rename = "priceInUSD")]
    pub price_in_usd: Option<f64>,
    pub change: Option<f64>,
    pub datetime: Option<String>,
}

/// Optional narrowing applied after the report is computed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilter {
    /// Keep only rows for this coin. Baselines are not affected.
    pub coin: Option<String>,
    /// Keep only the most recent `limit` rows.
    pub limit: Option<usize>,
}

impl ReportFilter {
    /// Apply the filter to rows already ordered newest first.
    #[must_use]
    pub fn apply(&self, mut rows: Vec<ProgressRow>) -> Vec<ProgressRow> {
        if let Some(coin) = &self.coin {
            rows.retain(|row| row.coin.as_deref() == Some(coin.as_str()));
        }
        if let Some(limit) = self.limit {
            rows.truncate(limit);
        }
        rows
    }
}

/// Compute the report from raw records.
///
/// `records` should be in row-id order, as read from the table; that order
/// decides ties between equal timestamps.
#[must_use]
pub fn compute_progress(records: &[TradeRecord]) -> Vec<ProgressRow> {
    let baselines = partition_buys(records);

    let mut primaries: Vec<&TradeRecord> =
        records.iter().filter(|r| r.is_completed_buy()).collect();
    // Stable sort: None < Some, so reversing puts NULL timestamps last.
    primaries.sort_by(|a, b| b.datetime.cmp(&a.datetime));

    primaries
        .into_iter()
        .map(|record| {
            let change = previous_buy(&baselines, record)
                .and_then(|prev| Some(record.amount? - prev.amount?));
            ProgressRow {
                coin: record.coin.clone(),
                amount: record.amount,
                price_in_usd: record.price_in_usd,
                change,
                datetime: record.datetime.as_ref().map(|at| at.as_str().to_string()),
            }
        })
        .collect()
}

/// Buys (any state) grouped by coin, each partition ordered by
/// `(datetime asc, id desc)`. Rows without a coin or timestamp can never
/// match a lookup and are left out.
fn partition_buys(records: &[TradeRecord]) -> HashMap<&str, Vec<&TradeRecord>> {
    let mut partitions: HashMap<&str, Vec<&TradeRecord>> = HashMap::new();
    for record in records.iter().filter(|r| r.is_buy()) {
        if let (Some(coin), Some(_)) = (record.coin.as_deref(), record.datetime.as_ref()) {
            partitions.entry(coin).or_default().push(record);
        }
    }
    for partition in partitions.values_mut() {
        partition.sort_by(|a, b| a.datetime.cmp(&b.datetime).then(b.id.cmp(&a.id)));
    }
    partitions
}

/// Latest buy of the same coin strictly before `record`.
fn previous_buy<'a>(
    partitions: &HashMap<&str, Vec<&'a TradeRecord>>,
    record: &TradeRecord,
) -> Option<&'a TradeRecord> {
    let coin = record.coin.as_deref()?;
    let at = record.datetime.as_ref()?;
    let partition = partitions.get(coin)?;
    let idx = partition.partition_point(|r| r.datetime.as_ref() < Some(at));
    idx.checked_sub(1).map(|i| partition[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;

    fn buy(id: i32, coin: &str, amount: f64, at: &str) -> TradeRecord {
        TradeRecord {
            id,
            coin: Some(coin.into()),
            selling: Some(false),
            state: Some("COMPLETE".into()),
            amount: Some(amount),
            price_in_usd: Some(100.0),
            datetime: Some(at.into()),
        }
    }

    fn sell(id: i32, coin: &str, amount: f64, at: &str) -> TradeRecord {
        TradeRecord {
            selling: Some(true),
            ..buy(id, coin, amount, at)
        }
    }

    fn with_state(mut record: TradeRecord, state: &str) -> TradeRecord {
        record.state = Some(state.into());
        record
    }

    #[test]
    fn change_is_difference_to_previous_buy() {
        let rows = compute_progress(&[
            buy(1, "ADA", 100.0, "2021-03-01 10:00:00"),
            buy(2, "ADA", 120.0, "2021-03-02 10:00:00"),
        ]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].datetime.as_deref(), Some("2021-03-02 10:00:00"));
        assert_eq!(rows[0].change, Some(20.0));
        assert_eq!(rows[1].change, None);
    }

    #[test]
    fn rows_are_newest_first() {
        let rows = compute_progress(&[
            buy(1, "ADA", 1.0, "2021-03-01"),
            buy(2, "XLM", 1.0, "2021-03-03"),
            buy(3, "ADA", 1.0, "2021-03-02"),
        ]);
        let order: Vec<_> = rows.iter().map(|r| r.datetime.as_deref().unwrap()).collect();
        assert_eq!(order, ["2021-03-03", "2021-03-02", "2021-03-01"]);
    }

    #[test]
    fn sells_are_neither_rows_nor_baselines() {
        let rows = compute_progress(&[
            buy(1, "ADA", 100.0, "2021-03-01"),
            sell(2, "ADA", 999.0, "2021-03-02"),
            buy(3, "ADA", 110.0, "2021-03-03"),
        ]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].change, Some(10.0));
    }

    #[test]
    fn incomplete_buys_are_baselines_but_not_rows() {
        let rows = compute_progress(&[
            buy(1, "ADA", 100.0, "2021-03-01"),
            with_state(buy(2, "ADA", 105.0, "2021-03-02"), "ORDERED"),
            buy(3, "ADA", 110.0, "2021-03-03"),
        ]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].change, Some(5.0));
        assert_eq!(rows[1].change, None);
    }

    #[test]
    fn baselines_stay_within_coin() {
        let rows = compute_progress(&[
            buy(1, "XLM", 50.0, "2021-03-01"),
            buy(2, "ADA", 100.0, "2021-03-02"),
        ]);
        assert!(rows.iter().all(|r| r.change.is_none()));
    }

    #[test]
    fn equal_timestamp_is_not_prior() {
        let rows = compute_progress(&[
            buy(1, "ADA", 100.0, "2021-03-01"),
            buy(2, "ADA", 130.0, "2021-03-01"),
        ]);
        assert!(rows.iter().all(|r| r.change.is_none()));
    }

    #[test]
    fn tied_baselines_pick_lowest_id() {
        let rows = compute_progress(&[
            with_state(buy(1, "ADA", 90.0, "2021-03-01"), "STARTING"),
            with_state(buy(2, "ADA", 95.0, "2021-03-01"), "ORDERED"),
            buy(3, "ADA", 100.0, "2021-03-02"),
        ]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].change, Some(10.0));
    }

    #[test]
    fn null_amounts_give_null_change() {
        let mut prior = buy(1, "ADA", 0.0, "2021-03-01");
        prior.amount = None;
        let rows = compute_progress(&[prior, buy(2, "ADA", 100.0, "2021-03-02")]);
        assert_eq!(rows[0].change, None);
    }

    #[test]
    fn null_timestamps_sort_last_without_baseline() {
        let mut undated = buy(2, "ADA", 120.0, "");
        undated.datetime = None;
        let rows = compute_progress(&[buy(1, "ADA", 100.0, "2021-03-01"), undated]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].datetime, None);
        assert_eq!(rows[1].change, None);
    }

    #[test]
    fn numeric_timestamps_order_numerically_before_text() {
        let at = |id, amount, text: &str, class| TradeRecord {
            datetime: Some(Timestamp::from_stored(text.into(), class)),
            ..buy(id, "ADA", amount, "")
        };
        let rows = compute_progress(&[
            at(1, 100.0, "9", "integer"),
            at(2, 130.0, "10", "integer"),
            buy(3, "ADA", 150.0, "2021-03-01"),
        ]);
        let order: Vec<_> = rows.iter().map(|r| r.datetime.as_deref().unwrap()).collect();
        assert_eq!(order, ["2021-03-01", "10", "9"]);
        assert_eq!(rows[0].change, Some(20.0));
        assert_eq!(rows[1].change, Some(30.0));
        assert_eq!(rows[2].change, None);
    }

    #[test]
    fn empty_input_gives_empty_report() {
        assert!(compute_progress(&[]).is_empty());
    }

    #[test]
    fn filter_by_coin_keeps_baselines() {
        let rows = compute_progress(&[
            buy(1, "ADA", 100.0, "2021-03-01"),
            buy(2, "XLM", 10.0, "2021-03-02"),
            buy(3, "ADA", 125.0, "2021-03-03"),
        ]);
        let filter = ReportFilter {
            coin: Some("ADA".into()),
            limit: Some(1),
        };
        let rows = filter.apply(rows);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].change, Some(25.0));
    }

    #[test]
    fn json_uses_report_column_names() {
        let row = ProgressRow {
            coin: Some("ADA".into()),
            amount: Some(1.5),
            price_in_usd: Some(2.0),
            change: None,
            datetime: Some("2021-03-01".into()),
        };
        let json = serde_json::to_value(&row).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        for column in ["coin", "amount", "priceInUSD", "change", "datetime"] {
            assert!(keys.contains(&column.to_string()), "missing {column}");
        }
        assert!(json["change"].is_null());
    }
}
