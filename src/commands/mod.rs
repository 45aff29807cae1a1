pub mod check;
pub mod convert;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use cinemateket_core::{EventRecord, ListingFile, ShowtimeSource};
use tracing::{debug, info};

use crate::config::AppConfig;

/// Listing source with the configured venue and zone as fallbacks.
fn listing_source(config: &AppConfig, today: NaiveDate) -> ListingFile {
    ListingFile::new(today)
        .with_location(config.location.clone())
        .with_timezone(config.timezone.clone())
}

/// Records from each listing, grouped per listing in argument order.
fn discover_all(
    source: &impl ShowtimeSource,
    listings: &[PathBuf],
) -> Result<Vec<(PathBuf, Vec<EventRecord>)>> {
    listings
        .iter()
        .map(|path| {
            let records = discover(source, path)?;
            Ok((path.clone(), records))
        })
        .collect()
}

fn discover(source: &impl ShowtimeSource, path: &Path) -> Result<Vec<EventRecord>> {
    let id = path.to_string_lossy();
    let records = source
        .discover_showtimes(&id)
        .with_context(|| format!("Could not read showtimes from {}", path.display()))?;

    if let Some(first) = records.first() {
        info!(
            listing = %path.display(),
            title = %first.summary,
            showtimes = records.len(),
            "Located showtimes"
        );
    }
    for record in &records {
        debug!(title = %record.summary, start = %record.start, end = %record.end, "Located time");
    }

    Ok(records)
}
