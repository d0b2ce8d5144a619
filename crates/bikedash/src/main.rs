//! bikedash - bicycle-rental analytics charts from two CSV exports.

use anyhow::Result;
use bikedash::Dashboard;
use bikedash_common::{init_logging, LogOptions};
use bikedash_config::{Config, ConfigLoader};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start of the reporting range (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    from: Option<NaiveDate>,

    /// End of the reporting range (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    to: Option<NaiveDate>,

    /// Directory the charts are written into
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Log level (overrides the configured level)
    #[arg(short, long)]
    log_level: Option<String>,
}

fn apply_cli_overrides(config: &mut Config, args: &Args) {
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if let Some(from) = args.from {
        config.report.start_date = Some(from);
    }
    if let Some(to) = args.to {
        config.report.end_date = Some(to);
    }
    if let Some(dir) = &args.output_dir {
        config.charts.output_dir = dir.clone();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    apply_cli_overrides(&mut config, &args);
    // CLI dates bypass the loader, so revalidate the merged result.
    config.validate()?;

    // Initialize logging
    init_logging(&LogOptions {
        level: config.logging.level.clone(),
        ansi: config.logging.ansi,
    })?;

    info!("Starting bikedash");
    info!(
        "Daily data: {}, hourly data: {}, charts into {}",
        config.data.daily_path.display(),
        config.data.hourly_path.display(),
        config.charts.output_dir.display()
    );

    let dashboard = Dashboard::load(config)?;
    let summary = dashboard.run()?;

    info!(
        "Done: {} days and {} hourly slots reported over {}",
        summary.days_in_range, summary.hours_in_range, summary.range
    );

    Ok(())
}
