use tracing::trace;

use crate::error::{ProfileError, Result};
use crate::model::profile::{ProfileEntry, ValueSource, WeekdaySlot};
use crate::model::weekday::Weekday;
use crate::service::aggregator::WeekdayTotals;

/// Record of one slot filled during the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GapFill {
    weekday: Weekday,
    prev: Weekday,
    next: Weekday,
    value: i64,
}

#[derive(Debug, Clone, Copy)]
enum Scan {
    Backward,
    Forward,
}

pub fn slots_from_totals(totals: &WeekdayTotals) -> [WeekdaySlot; 7] {
    std::array::from_fn(|i| match totals[i] {
        Some(t) => WeekdaySlot::Filled(t.sum),
        None => WeekdaySlot::Unfilled,
    })
}

/// Resolves all seven weekdays in a single Mon..Sun pass.
///
/// Aggregated weekdays keep their sum untouched. Each missing weekday gets the
/// rounded mean of its nearest filled neighbours on the ring, and slots filled
/// earlier in the pass count as neighbours for later ones, so a run of
/// consecutive gaps cascades left to right instead of interpolating between
/// the run's original endpoints.
pub fn interpolate(totals: &WeekdayTotals) -> Result<Vec<ProfileEntry>> {
    let mut slots = slots_from_totals(totals);
    let mut entries = Vec::with_capacity(slots.len());

    for (i, total) in totals.iter().enumerate() {
        let weekday = Weekday::from_index(i);
        let entry = match total {
            Some(total) => ProfileEntry {
                weekday,
                value: total.sum,
                source: ValueSource::Observed { count: total.count },
            },
            None => {
                let fill = fill_slot(&mut slots, i)?;
                ProfileEntry {
                    weekday,
                    value: fill.value,
                    source: ValueSource::Interpolated {
                        prev: fill.prev,
                        next: fill.next,
                    },
                }
            }
        };
        entries.push(entry);
    }

    Ok(entries)
}

/// Fills slot `i` from its current neighbours and marks it filled.
fn fill_slot(slots: &mut [WeekdaySlot; 7], i: usize) -> Result<GapFill> {
    let (prev_index, prev) = nearest_filled(slots, i, Scan::Backward).ok_or(ProfileError::InsufficientData)?;
    let (next_index, next) = nearest_filled(slots, i, Scan::Forward).ok_or(ProfileError::InsufficientData)?;

    let value = rounded_mean(prev, next);
    slots[i] = WeekdaySlot::Filled(value);

    let fill = GapFill {
        weekday: Weekday::from_index(i),
        prev: Weekday::from_index(prev_index),
        next: Weekday::from_index(next_index),
        value,
    };
    trace!(weekday = %fill.weekday, prev = %fill.prev, next = %fill.next, value, "interpolated gap");
    Ok(fill)
}

/// Walks the ring from `start` (exclusive) and returns the first filled slot.
/// Gives up after a full lap, i.e. when nothing else is filled.
fn nearest_filled(slots: &[WeekdaySlot; 7], start: usize, scan: Scan) -> Option<(usize, i64)> {
    let len = slots.len();
    (1..len)
        .map(|step| match scan {
            Scan::Backward => (start + len - step) % len,
            Scan::Forward => (start + step) % len,
        })
        .find_map(|idx| slots[idx].value().map(|v| (idx, v)))
}

/// Mean of `a` and `b`, rounding halves away from zero (10.5 -> 11, -10.5 -> -11).
pub fn rounded_mean(a: i64, b: i64) -> i64 {
    let sum = a as i128 + b as i128;
    let half = if sum >= 0 { (sum + 1) / 2 } else { (sum - 1) / 2 };
    // lies between a and b, so it always fits
    half as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::aggregator::DayTotal;

    fn totals(sums: [Option<i64>; 7]) -> WeekdayTotals {
        sums.map(|s| s.map(|sum| DayTotal { sum, count: 1 }))
    }

    fn values(entries: &[ProfileEntry]) -> Vec<i64> {
        entries.iter().map(|e| e.value).collect()
    }

    #[test]
    fn test_rounded_mean() {
        assert_eq!(rounded_mean(9, 12), 11);
        assert_eq!(rounded_mean(15, 20), 18);
        assert_eq!(rounded_mean(6, 12), 9);
        assert_eq!(rounded_mean(-9, -12), -11);
        assert_eq!(rounded_mean(-1, 0), -1);
        assert_eq!(rounded_mean(1, 0), 1);
        assert_eq!(rounded_mean(-3, 3), 0);
        assert_eq!(rounded_mean(i64::MAX, i64::MAX), i64::MAX);
        assert_eq!(rounded_mean(i64::MIN, i64::MIN), i64::MIN);
    }

    #[test]
    fn test_slots_from_totals() {
        let slots = slots_from_totals(&totals([Some(3), None, None, None, None, None, Some(0)]));
        assert_eq!(slots[0], WeekdaySlot::Filled(3));
        assert_eq!(slots[1], WeekdaySlot::Unfilled);
        assert_eq!(slots[6], WeekdaySlot::Filled(0));
    }

    #[test]
    fn test_cascading_fill() {
        let entries = interpolate(&totals([Some(2), Some(4), Some(6), None, None, Some(12), Some(14)])).unwrap();
        assert_eq!(values(&entries), vec![2, 4, 6, 9, 11, 12, 14]);
        // Friday's backward neighbour is the freshly filled Thursday
        assert_eq!(
            entries[4].source,
            ValueSource::Interpolated {
                prev: Weekday::Thu,
                next: Weekday::Sat
            }
        );
    }

    #[test]
    fn test_wraps_around_the_week() {
        let entries = interpolate(&totals([Some(10), Some(0), Some(0), Some(0), Some(0), Some(20), None])).unwrap();
        assert_eq!(entries[6].value, 15);
        assert_eq!(
            entries[6].source,
            ValueSource::Interpolated {
                prev: Weekday::Sat,
                next: Weekday::Mon
            }
        );
    }

    #[test]
    fn test_leading_gap_looks_back_to_sunday() {
        let entries = interpolate(&totals([None, Some(4), Some(4), Some(4), Some(4), Some(4), Some(7)])).unwrap();
        assert_eq!(entries[0].value, 6);
        assert_eq!(
            entries[0].source,
            ValueSource::Interpolated {
                prev: Weekday::Sun,
                next: Weekday::Tue
            }
        );
    }

    #[test]
    fn test_single_anchor_spreads_everywhere() {
        let entries = interpolate(&totals([None, None, None, Some(7), None, None, None])).unwrap();
        assert_eq!(values(&entries), vec![7; 7]);
    }

    #[test]
    fn test_every_entry_carries_its_source() {
        let mut sums = totals([Some(5), None, Some(-1), None, None, None, None]);
        sums[0] = Some(DayTotal { sum: 5, count: 3 });
        let entries = interpolate(&sums).unwrap();

        assert_eq!(entries.len(), 7);
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.weekday, Weekday::from_index(i));
        }
        assert_eq!(entries[0].source, ValueSource::Observed { count: 3 });
        assert_eq!(entries[2].source, ValueSource::Observed { count: 1 });
        assert!(entries
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 0 && *i != 2)
            .all(|(_, e)| matches!(e.source, ValueSource::Interpolated { .. })));
    }

    #[test]
    fn test_all_unfilled_is_insufficient() {
        assert!(matches!(interpolate(&[None; 7]), Err(ProfileError::InsufficientData)));
    }

    #[test]
    fn test_full_week_is_untouched() {
        let entries = interpolate(&totals([Some(1), Some(2), Some(3), Some(4), Some(5), Some(6), Some(7)])).unwrap();
        assert_eq!(values(&entries), vec![1, 2, 3, 4, 5, 6, 7]);
        assert!(entries.iter().all(|e| e.is_observed()));
    }
}
