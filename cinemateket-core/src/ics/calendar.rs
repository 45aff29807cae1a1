//! VCALENDAR document assembly.

use std::io::{BufWriter, Write};

use crate::error::IcsResult;
use crate::ics::event::EventEncoder;
use crate::record::EventRecord;
use crate::source::{Clock, UidSource};

/// A component nested inside the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    Event(EventRecord),
}

/// An ordered set of components plus the top-level calendar properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    pub version: String,
    pub calscale: String,
    pub components: Vec<Component>,
}

const VERSION: &str = "2.0";
const CALSCALE: &str = "GREGORIAN";

impl Default for Calendar {
    fn default() -> Self {
        Calendar {
            version: VERSION.to_string(),
            calscale: CALSCALE.to_string(),
            components: Vec::new(),
        }
    }
}

impl Calendar {
    /// An empty VERSION 2.0 Gregorian calendar.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, component: Component) -> &mut Self {
        self.components.push(component);
        self
    }

    /// Write the document to `sink`, components in insertion order.
    ///
    /// Stops at the first failing component. Whatever was written before the
    /// failure stays written; use [`Calendar::to_bytes`] when the output must
    /// be all or nothing.
    pub fn encode<C, U, W>(&self, encoder: &EventEncoder<C, U>, sink: W) -> IcsResult<()>
    where
        C: Clock,
        U: UidSource,
        W: Write,
    {
        let events = self.components.iter().map(|component| match component {
            Component::Event(record) => record,
        });
        write_document(&self.version, &self.calscale, events, encoder, sink)
    }

    /// Encode the whole document into memory.
    pub fn to_bytes<C, U>(&self, encoder: &EventEncoder<C, U>) -> IcsResult<Vec<u8>>
    where
        C: Clock,
        U: UidSource,
    {
        let mut out = Vec::new();
        self.encode(encoder, &mut out)?;
        Ok(out)
    }
}

impl FromIterator<EventRecord> for Calendar {
    fn from_iter<I: IntoIterator<Item = EventRecord>>(records: I) -> Self {
        Calendar {
            components: records.into_iter().map(Component::Event).collect(),
            ..Calendar::default()
        }
    }
}

/// Write a VERSION 2.0 Gregorian calendar holding `records` in order to `sink`.
pub fn build_document<C, U, W>(
    records: &[EventRecord],
    encoder: &EventEncoder<C, U>,
    sink: W,
) -> IcsResult<()>
where
    C: Clock,
    U: UidSource,
    W: Write,
{
    write_document(VERSION, CALSCALE, records, encoder, sink)
}

fn write_document<'a, C, U, W>(
    version: &str,
    calscale: &str,
    events: impl IntoIterator<Item = &'a EventRecord>,
    encoder: &EventEncoder<C, U>,
    sink: W,
) -> IcsResult<()>
where
    C: Clock,
    U: UidSource,
    W: Write,
{
    let mut w = BufWriter::new(sink);

    w.write_all(b"BEGIN:VCALENDAR\r\n")?;

    for (name, value) in [("VERSION", version), ("CALSCALE", calscale)] {
        if value.is_empty() {
            continue;
        }
        write!(w, "{name}:{value}\r\n")?;
    }

    for record in events {
        encoder.encode(record, &mut w)?;
    }

    w.write_all(b"END:VCALENDAR\r\n")?;
    w.flush()?;
    Ok(())
}
