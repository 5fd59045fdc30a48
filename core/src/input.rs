use crate::error::{ProfileError, Result};
use crate::model::observation::ObservationSet;

/// Parses inline `DATE:VALUE` arguments, e.g. `2020-01-06:-6`.
///
/// Dates are kept verbatim and validated when the profile is built. A date
/// given twice is rejected since observation keys are unique.
pub fn parse_observation_args(args: &[String]) -> Result<ObservationSet> {
    let mut set = ObservationSet::new();

    for arg in args {
        let (date, value) = arg
            .split_once(':')
            .ok_or_else(|| ProfileError::invalid_observation(arg, "expected DATE:VALUE"))?;
        if date.is_empty() {
            return Err(ProfileError::invalid_observation(arg, "missing date"));
        }
        let value: i64 = value
            .trim()
            .parse()
            .map_err(|_| ProfileError::invalid_observation(arg, "value is not an integer"))?;
        if set.insert(date, value).is_some() {
            return Err(ProfileError::invalid_observation(arg, "date given more than once"));
        }
    }

    Ok(set)
}
