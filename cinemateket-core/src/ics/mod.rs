//! iCalendar (RFC 5545) output.
//!
//! - `text`: escaping and line folding of free-text values
//! - `event`: one VEVENT per screening
//! - `calendar`: the VCALENDAR document around the events

mod calendar;
mod event;
mod text;

pub use calendar::{Calendar, Component, build_document};
pub use event::{EventEncoder, SystemEncoder, encode_event};
pub use text::{CONTINUATION_WIDTH, FIRST_LINE_WIDTH, escape, fold, fold_and_escape};
