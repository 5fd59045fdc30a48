pub mod error;
pub mod input;
pub mod model;
pub mod service;
pub mod time;

pub use error::{ProfileError, Result};
pub use input::parse_observation_args;
pub use model::observation::ObservationSet;
pub use model::profile::{ProfileEntry, ValueSource, WeekdaySlot, WeeklyProfile};
pub use model::weekday::Weekday;
pub use service::profile_builder::WeeklyProfileBuilder;
pub use time::resolve_weekday;

/// Builds the Mon..Sun profile for `observations`.
///
/// Values sharing a weekday are summed; weekdays without observations are
/// filled from their nearest filled neighbours on the 7-day ring.
pub fn build_weekly_profile(observations: &ObservationSet) -> Result<WeeklyProfile> {
    WeeklyProfileBuilder::new().build(observations)
}
