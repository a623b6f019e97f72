//! Calendar-date arithmetic shared by the calculators.
//!
//! Everything works on [`NaiveDate`]: no time of day, no timezone, so a
//! daylight-saving transition can never shift a day count.

use chrono::NaiveDate;

use crate::error::ValidationError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a host date key.
///
/// Accepts `YYYY-MM-DD`, or an ISO timestamp whose first ten characters are
/// `YYYY-MM-DD` (`2024-01-05T00:00:00Z`). The time part is dropped, never
/// converted.
pub fn parse_date_key(input: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = input.trim();
    let date_part = match trimmed.split_once('T') {
        Some((date, _time)) => date,
        None => trimmed,
    };

    NaiveDate::parse_from_str(date_part, DATE_FORMAT).map_err(|_| ValidationError::InvalidDate {
        input: input.to_string(),
    })
}

/// Format as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Whole calendar days from `start` to `date`. Negative when `date` is earlier.
pub fn days_since(start: NaiveDate, date: NaiveDate) -> i64 {
    date.signed_duration_since(start).num_days()
}

/// Zero-based position of `date` inside its cycle, or `None` before `start`.
///
/// `cycle_length` must be non-zero; [`crate::CycleConfig`] guarantees it.
pub fn day_in_cycle(start: NaiveDate, date: NaiveDate, cycle_length: u32) -> Option<u32> {
    let days = days_since(start, date);
    if days < 0 {
        return None;
    }
    // rem_euclid of a non-negative value by a value <= u32::MAX fits in u32
    Some(days.rem_euclid(i64::from(cycle_length)) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_plain_date_key() {
        assert_eq!(parse_date_key("2024-01-05").unwrap(), d(2024, 1, 5));
        assert_eq!(parse_date_key("  2024-12-31\n").unwrap(), d(2024, 12, 31));
    }

    #[test]
    fn parses_timestamp_by_dropping_time() {
        assert_eq!(parse_date_key("2024-03-10T23:30:00-08:00").unwrap(), d(2024, 3, 10));
        assert_eq!(parse_date_key("2024-03-10T00:00:00Z").unwrap(), d(2024, 3, 10));
    }

    #[test]
    fn rejects_garbage_and_impossible_dates() {
        assert!(parse_date_key("").is_err());
        assert!(parse_date_key("yesterday").is_err());
        assert!(parse_date_key("2024-02-30").is_err());
        assert!(matches!(
            parse_date_key("2024/01/05"),
            Err(ValidationError::InvalidDate { .. })
        ));
    }

    #[test]
    fn format_is_zero_padded() {
        assert_eq!(format_date(d(2024, 1, 5)), "2024-01-05");
    }

    #[test]
    fn days_since_crosses_dst_and_leap_day() {
        // US DST starts 2024-03-10; calendar arithmetic is unaffected
        assert_eq!(days_since(d(2024, 3, 9), d(2024, 3, 11)), 2);
        assert_eq!(days_since(d(2024, 2, 28), d(2024, 3, 1)), 2);
        assert_eq!(days_since(d(2024, 1, 10), d(2024, 1, 1)), -9);
    }

    #[test]
    fn day_in_cycle_wraps_and_floors_before_start() {
        let start = d(2024, 1, 1);
        assert_eq!(day_in_cycle(start, d(2024, 1, 1), 28), Some(0));
        assert_eq!(day_in_cycle(start, d(2024, 1, 28), 28), Some(27));
        assert_eq!(day_in_cycle(start, d(2024, 1, 29), 28), Some(0));
        assert_eq!(day_in_cycle(start, d(2023, 12, 31), 28), None);
    }
}
