//! The report command: clear, query, print.

use std::io::{self, Write};

use tracing::info;

use crate::adapter::outbound::sqlite::SqliteTradeStore;
use crate::cli::output;
use crate::config::Config;
use crate::domain::ReportFilter;
use crate::error::Result;

/// Run the report once. Any failure is returned as-is; nothing is retried
/// and nothing is printed to stdout unless the whole report succeeded.
pub fn run(config: &Config, filter: &ReportFilter) -> Result<()> {
    if config.output.clear {
        output::clear_screen()?;
    }

    let mut store = SqliteTradeStore::open(&config.database)?;
    let rows = filter.apply(store.report(config.output.engine)?);
    info!(rows = rows.len(), engine = ?config.output.engine, "Report ready");

    let rendered = output::render(&rows, config.output.mode, &config.output.null_value)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    stdout.flush()?;
    Ok(())
}
