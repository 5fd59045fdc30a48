pub mod aggregator;
pub mod interpolator;
pub mod profile_builder;
