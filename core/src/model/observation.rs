use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{ProfileError, Result};

/// Date-keyed observations, key "YYYY-MM-DD".
///
/// Keys are kept sorted, so iteration visits dates in ascending order.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct ObservationSet {
    values: BTreeMap<String, i64>,
}

impl ObservationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value for `date`, returning the previous one if the key existed.
    pub fn insert(&mut self, date: impl Into<String>, value: i64) -> Option<i64> {
        self.values.insert(date.into(), value)
    }

    pub fn get(&self, date: &str) -> Option<i64> {
        self.values.get(date).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.values.iter().map(|(date, value)| (date.as_str(), *value))
    }

    /// Parses a JSON object of `"YYYY-MM-DD": number`.
    ///
    /// Numbers may be written with a fractional part (`4.0`) but must hold an
    /// integral value. A date key repeated within the document is rejected.
    /// Date keys are not validated here; that happens when the profile is built.
    pub fn from_json(json: &str) -> Result<Self> {
        let RawEntries(raw) = serde_json::from_str(json)?;
        let mut set = Self::new();
        for (date, value) in raw {
            if set.values.contains_key(&date) {
                return Err(ProfileError::invalid_observation(&date, "date given more than once"));
            }
            let number = integral_value(&value)
                .map_err(|reason| ProfileError::invalid_observation(&date, reason))?;
            set.values.insert(date, number);
        }
        Ok(set)
    }
}

/// Object entries in document order, duplicates included.
struct RawEntries(Vec<(String, JsonValue)>);

impl<'de> Deserialize<'de> for RawEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object mapping dates to numbers")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<RawEntries, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, JsonValue>()? {
                    entries.push(entry);
                }
                Ok(RawEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

fn integral_value(value: &JsonValue) -> std::result::Result<i64, String> {
    let number = match value {
        JsonValue::Number(n) => n,
        other => return Err(format!("expected a number, found {}", other)),
    };
    if let Some(i) = number.as_i64() {
        return Ok(i);
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
        Some(f) if f.fract() == 0.0 => Err(format!("{} is out of range", number)),
        Some(_) => Err(format!("{} is not an integer", number)),
        None => Err(format!("{} is not representable", number)),
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for ObservationSet {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
