//! Film listings and the sources that turn them into screening records.
//!
//! A listing is what can be read off one film page on the cinema's website:
//! title, synopsis, runtime and the showtime labels. Listings are stored as
//! TOML files so the calendar can be built without touching the website.

use std::path::Path;

use chrono::{Duration, NaiveDate};
use serde::Deserialize;

use crate::error::{IcsError, IcsResult};
use crate::record::EventRecord;
use crate::showtime::parse_showtime;

/// Venue address used when a listing does not name one.
pub const DEFAULT_LOCATION: &str = "Cinemateket, Lønporten 2, 1121 København K, Denmark";

/// Zone the cinema's showtimes are printed in.
pub const DEFAULT_TIMEZONE: &str = "Europe/Copenhagen";

/// One film page: a title screened at one or more showtimes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FilmListing {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub runtime_minutes: u32,
    pub url: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    pub showtimes: Vec<String>,
}

impl FilmListing {
    /// Parse a listing from TOML text.
    pub fn from_toml(content: &str) -> IcsResult<Self> {
        toml::from_str(content).map_err(|e| IcsError::Listing(e.to_string()))
    }

    /// One record per showtime, in listing order.
    ///
    /// Each screening ends `runtime_minutes` after it starts. `today` anchors
    /// the year of each showtime label.
    pub fn into_records(self, today: NaiveDate) -> IcsResult<Vec<EventRecord>> {
        if self.title.trim().is_empty() {
            return Err(IcsError::Listing(format!("listing for {} has no title", self.url)));
        }
        if self.showtimes.is_empty() {
            return Err(IcsError::Listing(format!("no showtimes found for title {}", self.title)));
        }

        let runtime = Duration::minutes(i64::from(self.runtime_minutes));
        let location = self.location.unwrap_or_else(|| DEFAULT_LOCATION.to_string());
        let timezone_id = self.timezone.unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());

        self.showtimes
            .iter()
            .map(|label| {
                let start = parse_showtime(label, today)?;
                Ok(EventRecord {
                    summary: self.title.clone(),
                    description: self.description.clone(),
                    location: location.clone(),
                    url: self.url.clone(),
                    start,
                    end: start + runtime,
                    all_day: false,
                    timezone_id: timezone_id.clone(),
                })
            })
            .collect()
    }
}

/// Supplies the screening records for a source identifier.
pub trait ShowtimeSource {
    fn discover_showtimes(&self, source: &str) -> IcsResult<Vec<EventRecord>>;
}

/// Reads listing files from disk; the source identifier is the file path.
#[derive(Debug, Clone)]
pub struct ListingFile {
    today: NaiveDate,
    location: Option<String>,
    timezone: Option<String>,
}

impl ListingFile {
    pub fn new(today: NaiveDate) -> Self {
        ListingFile {
            today,
            location: None,
            timezone: None,
        }
    }

    /// Venue used for listings that do not set `location`.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Zone used for listings that do not set `timezone`.
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn load(&self, path: &Path) -> IcsResult<FilmListing> {
        let content = std::fs::read_to_string(path)?;
        let mut listing = FilmListing::from_toml(&content).map_err(|e| match e {
            IcsError::Listing(reason) => IcsError::Listing(format!("{}: {reason}", path.display())),
            other => other,
        })?;

        if listing.location.is_none() {
            listing.location = self.location.clone();
        }
        if listing.timezone.is_none() {
            listing.timezone = self.timezone.clone();
        }
        Ok(listing)
    }
}

impl ShowtimeSource for ListingFile {
    fn discover_showtimes(&self, source: &str) -> IcsResult<Vec<EventRecord>> {
        self.load(Path::new(source))?.into_records(self.today)
    }
}

/// Fixed records, whatever the source identifier.
impl ShowtimeSource for [EventRecord] {
    fn discover_showtimes(&self, _source: &str) -> IcsResult<Vec<EventRecord>> {
        Ok(self.to_vec())
    }
}

impl ShowtimeSource for Vec<EventRecord> {
    fn discover_showtimes(&self, source: &str) -> IcsResult<Vec<EventRecord>> {
        self.as_slice().discover_showtimes(source)
    }
}
