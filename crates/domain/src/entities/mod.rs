//! Read models produced by observation queries

mod precipitation;
mod temperature;

pub use precipitation::{PrecipitationReading, PrecipitationSeries};
pub use temperature::{StationActivity, StationTemperatures, TemperatureReading, TemperatureSummary};
