//! Temperature read models

use serde::{Deserialize, Serialize};

use crate::{ObservationDate, StationId};

/// Temperature at observation time for one date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub date: ObservationDate,
    pub tobs: f64,
}

impl TemperatureReading {
    #[must_use]
    pub const fn new(date: ObservationDate, tobs: f64) -> Self {
        Self { date, tobs }
    }
}

/// A station together with how many observations it has on record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationActivity {
    pub station: StationId,
    pub observations: u64,
}

/// Recent temperature readings of a single station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationTemperatures {
    pub activity: StationActivity,
    /// First date of the window the readings were taken from
    pub window_start: ObservationDate,
    /// Readings in store order
    pub readings: Vec<TemperatureReading>,
}

/// Minimum, maximum and average temperature over a set of observations
///
/// Every field is `None` when no observation matched. The JSON field names
/// are `TMIN`, `TMAX` and `TAVG`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSummary {
    #[serde(rename = "TMIN")]
    pub min: Option<f64>,
    #[serde(rename = "TMAX")]
    pub max: Option<f64>,
    #[serde(rename = "TAVG")]
    pub avg: Option<f64>,
}

impl TemperatureSummary {
    /// Summary of an empty observation set
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            min: None,
            max: None,
            avg: None,
        }
    }

    /// True when no observation contributed to the summary
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.avg.is_none()
    }
}
