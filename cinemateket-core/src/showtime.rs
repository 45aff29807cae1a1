//! Parsing of Danish showtime labels such as `Fredag 21. december16:30`.
//!
//! The cinema's listings print a weekday, a day of month, a Danish month name
//! and a time of day with no separator between month and time. No year is
//! given; it is inferred from a reference date.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use crate::error::{IcsError, IcsResult};

static SHOWTIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<day>\d{1,2})\.\s*(?P<month>[^\d\s]+)\s*(?P<hour>\d{1,2}):(?P<minute>\d{2})")
        .expect("showtime pattern is valid")
});

/// Month number for a lowercase Danish month name.
fn month_number(name: &str) -> Option<u32> {
    let n = match name {
        "januar" => 1,
        "februar" => 2,
        "marts" => 3,
        "april" => 4,
        "maj" => 5,
        "juni" => 6,
        "juli" => 7,
        "august" => 8,
        "september" => 9,
        "oktober" => 10,
        "november" => 11,
        "december" => 12,
        _ => return None,
    };
    Some(n)
}

/// Parse a showtime label into a civil date-time.
///
/// The year is that of `today`, or the following year when the date would
/// otherwise already have passed: listings only announce upcoming screenings,
/// so a January date read in December belongs to next year.
pub fn parse_showtime(text: &str, today: NaiveDate) -> IcsResult<NaiveDateTime> {
    let caps = SHOWTIME_RE
        .captures(text)
        .ok_or_else(|| IcsError::ShowtimeParse(format!("unrecognised showtime '{text}'")))?;

    let month_name = caps["month"].trim().to_lowercase();
    let month = month_number(&month_name)
        .ok_or_else(|| IcsError::ShowtimeParse(format!("unknown month '{month_name}' in '{text}'")))?;

    // The pattern guarantees at most two digits in each of these
    let day: u32 = caps["day"].parse().unwrap_or_default();
    let hour: u32 = caps["hour"].parse().unwrap_or_default();
    let minute: u32 = caps["minute"].parse().unwrap_or_default();

    let time = NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| IcsError::ShowtimeParse(format!("invalid time of day in '{text}'")))?;

    let date = [today.year(), today.year() + 1]
        .into_iter()
        .filter_map(|year| NaiveDate::from_ymd_opt(year, month, day))
        .find(|date| *date >= today)
        .ok_or_else(|| IcsError::ShowtimeParse(format!("invalid date in '{text}'")))?;

    Ok(date.and_time(time))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn december_2018() -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 12, 1).unwrap()
    }

    fn parse(text: &str) -> IcsResult<String> {
        parse_showtime(text, december_2018()).map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
    }

    #[test]
    fn parses_day_with_non_latin_letters() {
        assert_eq!(parse("Søndag 30. december21:30").unwrap(), "2018-12-30 21:30:00");
    }

    #[test]
    fn parses_single_digit_day() {
        assert_eq!(parse("Søndag 1. december21:30").unwrap(), "2018-12-01 21:30:00");
    }

    #[test]
    fn parses_single_digit_hour() {
        assert_eq!(parse("Søndag 12. december9:30").unwrap(), "2018-12-12 09:30:00");
    }

    #[test]
    fn parses_with_whitespace_before_time() {
        assert_eq!(parse("Fredag 21. december 16:30").unwrap(), "2018-12-21 16:30:00");
    }

    #[test]
    fn month_name_is_case_insensitive() {
        assert_eq!(parse("Fredag 21. December16:30").unwrap(), "2018-12-21 16:30:00");
    }

    #[test]
    fn january_in_december_is_next_year() {
        assert_eq!(parse("Onsdag 2. januar19:00").unwrap(), "2019-01-02 19:00:00");
    }

    #[test]
    fn leap_day_skips_to_a_year_that_has_one() {
        let today = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
        let dt = parse_showtime("Torsdag 29. februar18:00", today).unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn fails_on_unknown_month() {
        let err = parse("Søndag 12. hestember:30").unwrap_err();
        assert!(matches!(err, IcsError::ShowtimeParse(_)), "{err}");
    }

    #[test]
    fn fails_on_missing_time() {
        assert!(parse("Søndag 12. december80").is_err());
    }

    #[test]
    fn fails_on_invalid_time() {
        assert!(parse("Søndag 12. december25:30").is_err());
    }

    #[test]
    fn fails_on_impossible_date() {
        assert!(parse("Mandag 31. april20:00").is_err());
    }

    #[test]
    fn fails_on_wrong_string() {
        assert!(parse("Claatu baratu naktuu ").is_err());
    }
}
