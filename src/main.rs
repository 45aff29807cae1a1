mod commands;
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "cinemateket-ics")]
#[command(about = "Turn Cinemateket film listings into an iCalendar file")]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of ~/.config/cinemateket-ics/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one calendar with every showtime from the given listings
    Convert {
        /// Listing files (TOML)
        #[arg(required = true)]
        listings: Vec<PathBuf>,

        /// Where to write the calendar (defaults to the configured output)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Write the calendar to stdout instead of a file
        #[arg(long)]
        stdout: bool,

        /// Date that showtime years are resolved against (YYYY-MM-DD, default today)
        #[arg(long)]
        today: Option<String>,
    },
    /// Parse listings and show the screenings they contain
    Check {
        /// Listing files (TOML)
        #[arg(required = true)]
        listings: Vec<PathBuf>,

        /// Date that showtime years are resolved against (YYYY-MM-DD, default today)
        #[arg(long)]
        today: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    match cli.command {
        Commands::Convert {
            listings,
            output,
            stdout,
            today,
        } => {
            let today = resolve_today(today.as_deref())?;
            let target = commands::convert::Target::resolve(output, stdout, &config);
            commands::convert::run(&config, &listings, today, target)
        }
        Commands::Check { listings, today } => {
            let today = resolve_today(today.as_deref())?;
            commands::check::run(&config, &listings, today)
        }
    }
}

/// Log to stderr so `convert --stdout` output stays a clean calendar.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_today(arg: Option<&str>) -> Result<NaiveDate> {
    match arg {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date format '{s}'. Expected YYYY-MM-DD")),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
