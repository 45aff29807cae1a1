use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use cinemateket_core::EventRecord;

use super::{discover_all, listing_source};
use crate::config::AppConfig;

pub fn run(config: &AppConfig, listings: &[PathBuf], today: NaiveDate) -> Result<()> {
    let source = listing_source(config, today);
    let found = discover_all(&source, listings)?;

    let mut total = 0;
    for (path, records) in &found {
        for record in records {
            record
                .validate()
                .with_context(|| format!("Invalid screening in {}", path.display()))?;
        }

        println!("{}", path.display());
        for record in records {
            println!("  {}", describe(record));
        }
        total += records.len();
    }

    println!();
    println!("{total} screening(s) in {} listing(s)", found.len());
    Ok(())
}

/// One-line summary of a screening, e.g. `2018-12-21 16:30–18:38 Europe/Copenhagen  Vertigo`
fn describe(record: &EventRecord) -> String {
    let zone = record.zone().unwrap_or("UTC");
    if record.all_day {
        format!("{} all-day {}  {}", record.start.format("%Y-%m-%d"), zone, record.summary)
    } else {
        format!(
            "{}–{} {}  {}",
            record.start.format("%Y-%m-%d %H:%M"),
            record.end.format("%H:%M"),
            zone,
            record.summary
        )
    }
}
