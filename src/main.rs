//! QuoteVerse - browse, search and save quotations from the command line

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use quoteverse::adapters::cli::{self, CliApp};
use quoteverse::config::load_config;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (API key goes here, not in the config file)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();

    // Commands report config errors themselves; here it only picks the log level
    let config_level = load_config(&app.config).ok().map(|c| c.logging.level);
    init_logging(app.verbose, app.debug, config_level.as_deref())?;

    cli::execute(app).await
}

fn init_logging(verbose: bool, debug: bool, config_level: Option<&str>) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new(config_level.unwrap_or("warn"))
    };

    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    Ok(())
}
