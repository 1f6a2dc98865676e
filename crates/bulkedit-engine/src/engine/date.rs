//! Date parsing and the grid's date storage format.
//!
//! The grid stores dates as midnight-anchored date-times, e.g.
//! `1/15/2023 12:00:00 AM` (unpadded month and day). The calendar date is
//! always taken as written; no time-zone conversion is applied.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use super::value::CellValue;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse a user-entered date. Returns `None` if the text is not a valid
/// calendar date in any accepted shape.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.date_naive());
    }
    None
}

/// Date interpretation of a cell value. Numbers are epoch milliseconds.
pub fn date_from_value(value: &CellValue) -> Option<NaiveDate> {
    match value {
        CellValue::Empty => None,
        CellValue::Text(s) => parse_date(s),
        CellValue::Number(ms) => {
            if !ms.is_finite() {
                return None;
            }
            DateTime::from_timestamp_millis(*ms as i64).map(|dt| dt.date_naive())
        }
    }
}

/// Render a date in the grid's storage format.
pub fn format_grid_date(date: NaiveDate) -> String {
    format!("{}/{}/{} 12:00:00 AM", date.month(), date.day(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_iso_dates() {
        assert_eq!(parse_date("2023-01-15"), Some(ymd(2023, 1, 15)));
        assert_eq!(parse_date(" 2023-01-15 "), Some(ymd(2023, 1, 15)));
        assert_eq!(parse_date("2023/01/15"), Some(ymd(2023, 1, 15)));
        assert_eq!(parse_date("2023-01-15T13:45:00"), Some(ymd(2023, 1, 15)));
        assert_eq!(parse_date("2023-01-15T23:30:00-05:00"), Some(ymd(2023, 1, 15)));
        assert_eq!(parse_date("2023-01-15T10:00:00.250Z"), Some(ymd(2023, 1, 15)));
    }

    #[test]
    fn test_parse_us_and_named_dates() {
        assert_eq!(parse_date("1/15/2023"), Some(ymd(2023, 1, 15)));
        assert_eq!(parse_date("01/05/2023"), Some(ymd(2023, 1, 5)));
        assert_eq!(parse_date("Jan 15, 2023"), Some(ymd(2023, 1, 15)));
        assert_eq!(parse_date("January 15, 2023"), Some(ymd(2023, 1, 15)));
        assert_eq!(parse_date("15 Jan 2023"), Some(ymd(2023, 1, 15)));
    }

    #[test]
    fn test_parse_grid_storage_format() {
        assert_eq!(parse_date("1/15/2023 12:00:00 AM"), Some(ymd(2023, 1, 15)));
        assert_eq!(parse_date("12/31/2023 11:59:59 PM"), Some(ymd(2023, 12, 31)));
    }

    #[test]
    fn test_rejects_invalid_dates() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2023-02-30"), None);
        assert_eq!(parse_date("13/01/2023"), None);
        assert_eq!(parse_date("2023-13-01"), None);
    }

    #[test]
    fn test_date_from_number_is_epoch_millis() {
        assert_eq!(
            date_from_value(&CellValue::Number(0.0)),
            Some(ymd(1970, 1, 1))
        );
        assert_eq!(date_from_value(&CellValue::Number(f64::NAN)), None);
        assert_eq!(date_from_value(&CellValue::Empty), None);
    }

    #[test]
    fn test_format_grid_date_is_unpadded() {
        assert_eq!(format_grid_date(ymd(2023, 1, 5)), "1/5/2023 12:00:00 AM");
        assert_eq!(format_grid_date(ymd(2023, 12, 25)), "12/25/2023 12:00:00 AM");
    }
}
