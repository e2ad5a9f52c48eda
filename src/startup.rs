use crate::calendar::{fetch, parse, selector};
use crate::config::Config;
use crate::cover;
use crate::error::{CoverResult, Error};
use crate::output;
use chrono::{Datelike, Utc};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Config(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and validate the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Run the whole pipeline once: fetch, select, render, persist
///
/// Fully sequential; any failure aborts the run with no output file.
pub fn run(config: &Config) -> CoverResult<PathBuf> {
    let tz = config.reference_timezone()?;
    let now = Utc::now().with_timezone(&tz).naive_local();
    let month = now.month();

    info!("Importing calendar...");
    let feed = fetch::fetch_calendar(&config.calendar_url)?;
    let raw = parse::parse_events(&feed, tz)?;
    info!("Parsed {} events from the feed", raw.len());

    let events = selector::select(raw, month, now, tz, config);
    for event in &events {
        info!("{}: {}", event.start.sort_key(), event.title);
    }

    info!("Generating image...");
    let jpeg = cover::generate(&events, month, now.year(), config)?;

    info!("Writing image...");
    output::write_cover(&config.output_dir, &jpeg, now)
}
