use clap::Parser;
use trade_progress::cli::{report, Cli};
use trade_progress::config::Config;
use tracing::{debug, info};

fn main() -> miette::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = Config::resolve(cli.config.as_deref(), cli.overrides())?;

    config.logging.init();
    info!(database = %config.database.display(), "progress starting");
    debug!(?config, "Resolved configuration");

    report::run(&config, &cli.filter())?;
    Ok(())
}
