//! Report rendering and terminal helpers.
//!
//! Values are printed the way the sqlite3 shell prints them: NULL becomes the
//! configured null text and REAL values use up to 15 significant digits with
//! a mandatory decimal point.

use std::io::{self, IsTerminal, Write};

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Padding, Style};
use tabled::{Table, Tabled};

use crate::config::OutputMode;
use crate::domain::ProgressRow;
use crate::error::Result;

const CLEAR_SCREEN: &[u8] = b"\x1b[2J\x1b[H";

/// Clear the terminal. Does nothing when stdout is redirected.
pub fn clear_screen() -> io::Result<()> {
    let mut stdout = io::stdout();
    if stdout.is_terminal() {
        stdout.write_all(CLEAR_SCREEN)?;
        stdout.flush()?;
    }
    Ok(())
}

#[derive(Tabled)]
struct DisplayRow {
    coin: String,
    amount: String,
    #[tabled(rename = "priceInUSD")]
    price_in_usd: String,
    change: String,
    datetime: String,
}

impl DisplayRow {
    fn new(row: &ProgressRow, null_value: &str) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_else(|| null_value.to_string());
        let real = |value: Option<f64>| value.map_or_else(|| null_value.to_string(), format_real);
        Self {
            coin: text(&row.coin),
            amount: real(row.amount),
            price_in_usd: real(row.price_in_usd),
            change: real(row.change),
            datetime: text(&row.datetime),
        }
    }
}

/// Render rows in the requested mode. The header is always present.
///
/// # Errors
/// Only JSON encoding can fail.
pub fn render(rows: &[ProgressRow], mode: OutputMode, null_value: &str) -> Result<String> {
    let display: Vec<DisplayRow> = rows.iter().map(|r| DisplayRow::new(r, null_value)).collect();
    let out = match mode {
        OutputMode::Json => serde_json::to_string_pretty(rows)?,
        OutputMode::Column => column_table(&display).to_string(),
        OutputMode::Box => Table::new(display).with(Style::modern()).to_string(),
        OutputMode::Markdown => Table::new(display).with(Style::markdown()).to_string(),
        OutputMode::Psql => Table::new(display).with(Style::psql()).to_string(),
    };
    Ok(out)
}

/// The sqlite3 shell's `-column -header` layout: no borders, two spaces
/// between columns, and a dash rule under each header as wide as the column.
fn column_table(display: &[DisplayRow]) -> Table {
    let header: Vec<String> = DisplayRow::headers().iter().map(|h| h.to_string()).collect();
    let records: Vec<Vec<String>> = display
        .iter()
        .map(|row| row.fields().iter().map(|f| f.to_string()).collect())
        .collect();
    let rule: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let width = records
                .iter()
                .map(|record| record[i].chars().count())
                .fold(name.chars().count(), usize::max);
            "-".repeat(width)
        })
        .collect();

    let mut builder = Builder::default();
    builder.push_record(header);
    builder.push_record(rule);
    for record in records {
        builder.push_record(record);
    }

    let mut table = builder.build();
    table
        .with(Style::empty())
        .with(Padding::new(0, 2, 0, 0))
        .modify(Columns::last(), Padding::zero());
    table
}

/// Format a REAL like the sqlite3 shell (`%!.15g`).
#[must_use]
pub fn format_real(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Inf" } else { "-Inf" }.to_string();
    }
    if value == 0.0 {
        return "0.0".to_string();
    }

    let scientific = format!("{value:.14e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..15).contains(&exponent) {
        let decimals = usize::try_from(14 - exponent).unwrap_or(0);
        with_decimal_point(format!("{value:.decimals$}"))
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            with_decimal_point(mantissa.to_string()),
            exponent.abs()
        )
    }
}

/// Trim trailing fractional zeros, keeping at least one digit after the point.
fn with_decimal_point(mut digits: String) -> String {
    if digits.contains('.') {
        while digits.ends_with('0') {
            digits.pop();
        }
        if digits.ends_with('.') {
            digits.push('0');
        }
    } else {
        digits.push_str(".0");
    }
    digits
}
