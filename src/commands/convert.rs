use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use cinemateket_core::{Calendar, SystemEncoder};
use tracing::info;

use super::{discover_all, listing_source};
use crate::config::AppConfig;

/// Where the finished calendar goes.
#[derive(Debug, PartialEq, Eq)]
pub enum Target {
    File(PathBuf),
    Stdout,
}

impl Target {
    /// `--stdout` wins, then `--output`, then the configured output path.
    pub fn resolve(output: Option<PathBuf>, stdout: bool, config: &AppConfig) -> Self {
        if stdout {
            Target::Stdout
        } else {
            Target::File(output.unwrap_or_else(|| config.output.clone()))
        }
    }
}

pub fn run(
    config: &AppConfig,
    listings: &[PathBuf],
    today: NaiveDate,
    target: Target,
) -> Result<()> {
    let source = listing_source(config, today);
    let calendar: Calendar = discover_all(&source, listings)?
        .into_iter()
        .flat_map(|(_, records)| records)
        .collect();

    // Encode fully before touching the destination so a failed build
    // never leaves a half-written calendar behind
    let bytes = calendar
        .to_bytes(&SystemEncoder::default())
        .context("Could not encode calendar")?;

    match target {
        Target::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
        Target::File(path) => {
            write_file(&path, &bytes)?;
            info!(
                path = %path.display(),
                events = calendar.components.len(),
                "Wrote calendar"
            );
        }
    }

    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Could not create directory {}", parent.display()))?;
    }

    std::fs::write(path, bytes)
        .with_context(|| format!("Couldn't open destination file {}", path.display()))
}
