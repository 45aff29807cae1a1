//! Normalized screening records, the input to the encoder.

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::{IcsError, IcsResult};

/// One screening of one film.
///
/// `start` and `end` are civil (wall-clock) times. With an empty or `"UTC"`
/// `timezone_id` they are read as UTC; otherwise they are local to the named
/// IANA zone.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventRecord {
    pub summary: String,
    #[serde(default)]
    pub description: String,
    pub location: String,
    pub url: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub timezone_id: String,
}

impl EventRecord {
    /// The zone the record's times are local to, or `None` for UTC.
    pub fn zone(&self) -> Option<&str> {
        match self.timezone_id.as_str() {
            "" | "UTC" => None,
            tzid => Some(tzid),
        }
    }

    /// Reject records the encoder would otherwise render as nonsense.
    pub fn validate(&self) -> IcsResult<()> {
        if self.end < self.start {
            return Err(self.invalid(format!(
                "ends ({}) before it starts ({})",
                self.end, self.start
            )));
        }

        if let Some(tzid) = self.zone() {
            tzid.parse::<Tz>()
                .map_err(|_| self.invalid(format!("unknown timezone '{tzid}'")))?;
        }

        Ok(())
    }

    fn invalid(&self, reason: String) -> IcsError {
        IcsError::InvalidRecord {
            summary: self.summary.clone(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 12, day)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn screening() -> EventRecord {
        EventRecord {
            summary: "Vertigo".to_string(),
            description: String::new(),
            location: "Cinemateket".to_string(),
            url: "https://www.dfi.dk/cinemateket/biograf/vertigo".to_string(),
            start: at(21, 16, 30),
            end: at(21, 18, 38),
            all_day: false,
            timezone_id: "Europe/Copenhagen".to_string(),
        }
    }

    #[test]
    fn valid_record_passes() {
        assert!(screening().validate().is_ok());
    }

    #[test]
    fn zero_length_record_passes() {
        let mut record = screening();
        record.end = record.start;
        assert!(record.validate().is_ok());
    }

    #[test]
    fn end_before_start_is_rejected() {
        let mut record = screening();
        record.end = at(21, 15, 0);

        let err = record.validate().unwrap_err();
        assert!(
            matches!(err, IcsError::InvalidRecord { ref summary, .. } if summary == "Vertigo"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let mut record = screening();
        record.timezone_id = "Europe/Atlantis".to_string();

        let err = record.validate().unwrap_err();
        assert!(err.to_string().contains("Europe/Atlantis"), "{err}");
    }

    #[test]
    fn empty_and_utc_zones_mean_utc() {
        let mut record = screening();
        record.timezone_id = String::new();
        assert_eq!(record.zone(), None);
        record.timezone_id = "UTC".to_string();
        assert_eq!(record.zone(), None);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn deserializes_with_defaults() {
        let record: EventRecord = toml::from_str(
            r#"
            summary = "Vertigo"
            location = "Cinemateket"
            url = "https://www.dfi.dk/cinemateket/biograf/vertigo"
            start = "2024-12-21T16:30:00"
            end = "2024-12-21T18:38:00"
            "#,
        )
        .unwrap();

        assert_eq!(record.description, "");
        assert!(!record.all_day);
        assert_eq!(record.zone(), None);
        assert_eq!(record.start, at(21, 16, 30));
    }
}
