//! Non-deterministic inputs to the encoder.
//!
//! The creation timestamp and the per-event UID are the only values an
//! encoded calendar takes from the environment. Both come through these
//! traits so tests can pin them down.

use std::cell::Cell;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::IcsResult;

/// Source of the current instant, used for DTSTAMP.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of event UIDs. Every call must return a value never returned before.
pub trait UidSource {
    fn next_uid(&self) -> IcsResult<String>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Time-ordered UUIDs (version 7).
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV7Source;

impl UidSource for UuidV7Source {
    fn next_uid(&self) -> IcsResult<String> {
        Ok(Uuid::now_v7().to_string())
    }
}

/// Deterministic UIDs of the form `<prefix>-<n>`, counting from 1.
#[derive(Debug)]
pub struct SequentialUids {
    prefix: String,
    next: Cell<u64>,
}

impl SequentialUids {
    pub fn new(prefix: impl Into<String>) -> Self {
        SequentialUids {
            prefix: prefix.into(),
            next: Cell::new(1),
        }
    }
}

impl UidSource for SequentialUids {
    fn next_uid(&self) -> IcsResult<String> {
        let n = self.next.get();
        self.next.set(n + 1);
        Ok(format!("{}-{}", self.prefix, n))
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

impl<T: UidSource + ?Sized> UidSource for &T {
    fn next_uid(&self) -> IcsResult<String> {
        (**self).next_uid()
    }
}
