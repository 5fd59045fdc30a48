use tracing::debug;

use crate::error::Result;
use crate::model::observation::ObservationSet;
use crate::model::profile::WeeklyProfile;
use crate::service::aggregator::aggregate;
use crate::service::interpolator::interpolate;

/// Turns sparse date-keyed observations into a dense Mon..Sun profile.
///
/// Stateless; a single builder can be shared freely between callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeeklyProfileBuilder;

impl WeeklyProfileBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, observations: &ObservationSet) -> Result<WeeklyProfile> {
        debug!(observations = observations.len(), "building weekly profile");

        // 1. Aggregate
        let totals = aggregate(observations)?;

        // 2. Detect and fill gaps
        let entries = interpolate(&totals)?;

        // 3. Assemble
        let profile = WeeklyProfile::from_entries(entries);
        debug!(
            observed = profile.observed_days().len(),
            interpolated = profile.interpolated_days().len(),
            "weekly profile built"
        );
        Ok(profile)
    }
}
