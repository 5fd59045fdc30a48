pub mod observation;
pub mod profile;
pub mod weekday;
