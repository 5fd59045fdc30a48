use chrono::{Datelike, NaiveDate};

use crate::error::{ProfileError, Result};
use crate::model::weekday::Weekday;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Resolves a strict `YYYY-MM-DD` key to its proleptic Gregorian weekday.
///
/// This is a pure calendar calculation; the local timezone never enters into it.
pub fn resolve_weekday(key: &str) -> Result<Weekday> {
    Ok(Weekday::from(parse_iso_date(key)?.weekday()))
}

pub fn parse_iso_date(key: &str) -> Result<NaiveDate> {
    // chrono alone would accept "2020-1-1" or a signed year
    if !has_iso_shape(key) {
        return Err(ProfileError::invalid_date(key));
    }
    let date = NaiveDate::parse_from_str(key, DATE_FORMAT)
        .map_err(|_| ProfileError::invalid_date(key))?;
    if date.year() < 1 {
        return Err(ProfileError::invalid_date(key));
    }
    Ok(date)
}

fn has_iso_shape(key: &str) -> bool {
    let bytes = key.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_dates() {
        assert_eq!(resolve_weekday("2020-01-01").unwrap(), Weekday::Wed);
        assert_eq!(resolve_weekday("2020-01-05").unwrap(), Weekday::Sun);
        assert_eq!(resolve_weekday("2020-01-06").unwrap(), Weekday::Mon);
        assert_eq!(resolve_weekday("2023-11-10").unwrap(), Weekday::Fri);
        assert_eq!(resolve_weekday("2024-02-29").unwrap(), Weekday::Thu);
        assert_eq!(resolve_weekday("0001-01-01").unwrap(), Weekday::Mon);
    }

    #[test]
    fn test_rejects_invalid_calendar_dates() {
        for key in ["2020-13-01", "2021-02-29", "2020-04-31", "2020-00-10", "0000-01-01"] {
            let err = resolve_weekday(key).unwrap_err();
            assert!(
                matches!(err, ProfileError::InvalidDateFormat { key: ref k } if k == key),
                "{} should be rejected",
                key
            );
        }
    }

    #[test]
    fn test_rejects_malformed_shapes() {
        for key in ["2020-1-01", "20200101", "2020/01/01", " 2020-01-01", "2020-01-01T00:00", "", "abcd-ef-gh"] {
            assert!(resolve_weekday(key).is_err(), "{:?} should be rejected", key);
        }
    }
}
