//! Calendar encoding for cinema showtimes.
//!
//! This crate turns screening records into an iCalendar document:
//! - `record`: the `EventRecord` each showtime is described by
//! - `ics`: escaping, folding, VEVENT and VCALENDAR encoding
//! - `source`: the clock and UID inputs, injectable for tests
//! - `listing` and `showtime`: reading film listings into records

pub mod error;
pub mod ics;
pub mod listing;
pub mod record;
pub mod showtime;
pub mod source;

pub use error::{IcsError, IcsResult};
pub use ics::{Calendar, Component, EventEncoder, SystemEncoder, build_document, encode_event};
pub use listing::{FilmListing, ListingFile, ShowtimeSource};
pub use record::EventRecord;
