//! VEVENT encoding.

use std::io::Write;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::IcsResult;
use crate::ics::text::fold_and_escape;
use crate::record::EventRecord;
use crate::source::{Clock, SystemClock, UidSource, UuidV7Source};

const DATE_FORMAT: &str = "%Y%m%d";
const UTC_DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const LOCAL_DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Write one event block for `record`.
///
/// `now` becomes DTSTAMP and `uid` becomes UID; nothing else about the output
/// depends on anything but the record. The block is rendered in memory and
/// handed to `sink` in a single write, so an invalid record leaves the sink
/// untouched.
pub fn encode_event<W: Write + ?Sized>(
    record: &EventRecord,
    now: DateTime<Utc>,
    uid: &str,
    sink: &mut W,
) -> IcsResult<()> {
    record.validate()?;

    let zone = record.zone();
    let mut out = String::with_capacity(512);

    out.push_str("BEGIN:VEVENT\r\n");
    push_line(&mut out, "DTSTAMP:", &now.format(UTC_DATE_TIME_FORMAT).to_string());
    push_line(&mut out, "UID:", uid);
    if let Some(tzid) = zone {
        push_line(&mut out, "TZID:", tzid);
    }

    out.push_str("SUMMARY:");
    out.push_str(&fold_and_escape(&record.summary));

    // URLs go out verbatim
    push_line(&mut out, "URL:", &record.url);

    out.push_str("LOCATION:");
    out.push_str(&fold_and_escape(&record.location));

    if !record.description.is_empty() {
        out.push_str("DESCRIPTION:");
        out.push_str(&fold_and_escape(&record.description));
    }

    push_line(&mut out, "DTSTART", &date_property(record, record.start));
    push_line(&mut out, "DTEND", &date_property(record, record.end));
    out.push_str("END:VEVENT\r\n");

    sink.write_all(out.as_bytes())?;
    Ok(())
}

/// Parameters and value of a DTSTART/DTEND property, starting at the `;`.
fn date_property(record: &EventRecord, time: NaiveDateTime) -> String {
    if record.all_day {
        return format!(";VALUE=DATE:{}", time.format(DATE_FORMAT));
    }

    match record.zone() {
        Some(tzid) => format!(
            ";TZID={};VALUE=DATE-TIME:{}",
            tzid,
            time.format(LOCAL_DATE_TIME_FORMAT)
        ),
        None => format!(";VALUE=DATE-TIME:{}", time.format(UTC_DATE_TIME_FORMAT)),
    }
}

fn push_line(out: &mut String, name: &str, value: &str) {
    out.push_str(name);
    out.push_str(value);
    out.push_str("\r\n");
}

/// Encoder stamped by the wall clock with UUIDv7 UIDs.
pub type SystemEncoder = EventEncoder<SystemClock, UuidV7Source>;

/// Encodes events with an injected clock and UID source.
#[derive(Debug, Clone, Default)]
pub struct EventEncoder<C, U> {
    clock: C,
    uids: U,
}

impl<C: Clock, U: UidSource> EventEncoder<C, U> {
    pub fn new(clock: C, uids: U) -> Self {
        EventEncoder { clock, uids }
    }

    /// Encode `record` stamped with the current time and a fresh UID.
    pub fn encode<W: Write + ?Sized>(&self, record: &EventRecord, sink: &mut W) -> IcsResult<()> {
        let uid = self.uids.next_uid()?;
        encode_event(record, self.clock.now(), &uid, sink)
    }
}
