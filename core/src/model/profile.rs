use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::model::weekday::Weekday;

/// One position of the working Mon..Sun array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekdaySlot {
    #[default]
    Unfilled,
    Filled(i64),
}

impl WeekdaySlot {
    pub fn value(self) -> Option<i64> {
        match self {
            WeekdaySlot::Filled(v) => Some(v),
            WeekdaySlot::Unfilled => None,
        }
    }

    pub fn is_filled(self) -> bool {
        matches!(self, WeekdaySlot::Filled(_))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ValueSource {
    /// Sum of `count` observations falling on this weekday.
    Observed { count: usize },
    /// Rounded mean of the nearest filled weekdays on either side.
    Interpolated { prev: Weekday, next: Weekday },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileEntry {
    pub weekday: Weekday,
    pub value: i64,
    pub source: ValueSource,
}

impl ProfileEntry {
    pub fn is_observed(&self) -> bool {
        matches!(self.source, ValueSource::Observed { .. })
    }
}

/// Dense Mon..Sun profile. Always holds exactly one entry per weekday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyProfile {
    entries: Vec<ProfileEntry>,
}

impl WeeklyProfile {
    /// `entries[i]` must describe `Weekday::ALL[i]`.
    pub(crate) fn from_entries(entries: Vec<ProfileEntry>) -> Self {
        debug_assert!(entries.len() == 7);
        debug_assert!(entries
            .iter()
            .enumerate()
            .all(|(i, e)| e.weekday.index() == i));
        Self { entries }
    }

    pub fn get(&self, weekday: Weekday) -> i64 {
        self.entries[weekday.index()].value
    }

    pub fn entry(&self, weekday: Weekday) -> &ProfileEntry {
        &self.entries[weekday.index()]
    }

    pub fn entries(&self) -> &[ProfileEntry] {
        &self.entries
    }

    pub fn values(&self) -> [i64; 7] {
        std::array::from_fn(|i| self.entries[i].value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, i64)> + '_ {
        self.entries.iter().map(|e| (e.weekday, e.value))
    }

    pub fn observed_days(&self) -> Vec<Weekday> {
        self.entries
            .iter()
            .filter(|e| e.is_observed())
            .map(|e| e.weekday)
            .collect()
    }

    pub fn interpolated_days(&self) -> Vec<Weekday> {
        self.entries
            .iter()
            .filter(|e| !e.is_observed())
            .map(|e| e.weekday)
            .collect()
    }

    /// Sum over all seven days, widened so it cannot overflow.
    pub fn total(&self) -> i128 {
        self.entries.iter().map(|e| e.value as i128).sum()
    }
}

impl Serialize for WeeklyProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(entry.weekday.as_str(), &entry.value)?;
        }
        map.end()
    }
}
