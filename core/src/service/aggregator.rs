use tracing::debug;

use crate::error::{ProfileError, Result};
use crate::model::observation::ObservationSet;
use crate::model::weekday::Weekday;
use crate::time::resolve_weekday;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayTotal {
    pub sum: i64,
    pub count: usize,
}

/// Per-weekday totals, indexed Mon..Sun. `None` means no observation fell on
/// that weekday, which is distinct from observations summing to zero.
pub type WeekdayTotals = [Option<DayTotal>; 7];

/// Sums every observation onto its weekday, visiting dates in ascending order.
pub fn aggregate(observations: &ObservationSet) -> Result<WeekdayTotals> {
    let mut totals: WeekdayTotals = [None; 7];

    for (date, value) in observations.iter() {
        let weekday = resolve_weekday(date)?;
        let slot = &mut totals[weekday.index()];
        *slot = Some(match *slot {
            None => DayTotal { sum: value, count: 1 },
            Some(total) => DayTotal {
                sum: total
                    .sum
                    .checked_add(value)
                    .ok_or(ProfileError::Overflow { weekday })?,
                count: total.count + 1,
            },
        });
    }

    for (weekday, total) in Weekday::ALL.iter().zip(totals.iter()) {
        if let Some(total) = total {
            debug!(%weekday, sum = total.sum, count = total.count, "aggregated weekday");
        }
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(entries: &[(&str, i64)]) -> ObservationSet {
        entries.iter().map(|(d, v)| (*d, *v)).collect()
    }

    #[test]
    fn test_sums_dates_sharing_a_weekday() {
        // 2020-01-01 and 2020-01-08 are both Wednesdays
        let totals = aggregate(&set(&[("2020-01-01", 4), ("2020-01-08", -2), ("2020-01-02", 4)])).unwrap();
        assert_eq!(totals[Weekday::Wed.index()], Some(DayTotal { sum: 2, count: 2 }));
        assert_eq!(totals[Weekday::Thu.index()], Some(DayTotal { sum: 4, count: 1 }));
        assert_eq!(totals[Weekday::Mon.index()], None);
    }

    #[test]
    fn test_zero_sum_is_still_present() {
        let totals = aggregate(&set(&[("2020-01-06", 5), ("2020-01-13", -5)])).unwrap();
        assert_eq!(totals[Weekday::Mon.index()], Some(DayTotal { sum: 0, count: 2 }));
    }

    #[test]
    fn test_empty_input_gives_no_totals() {
        assert_eq!(aggregate(&ObservationSet::new()).unwrap(), [None; 7]);
    }

    #[test]
    fn test_invalid_key_aborts() {
        let err = aggregate(&set(&[("2020-01-01", 1), ("2020-13-01", 1)])).unwrap_err();
        assert!(matches!(err, ProfileError::InvalidDateFormat { ref key } if key == "2020-13-01"));
    }

    #[test]
    fn test_overflow_is_reported() {
        let err = aggregate(&set(&[("2020-01-06", i64::MAX), ("2020-01-13", 1)])).unwrap_err();
        assert!(matches!(err, ProfileError::Overflow { weekday: Weekday::Mon }));
    }
}
