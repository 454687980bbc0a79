//! Precipitation readings and the per-date series built from them

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ObservationDate;

/// One (date, precipitation) pair as stored, without its station
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationReading {
    pub date: ObservationDate,
    /// Precipitation amount; `None` when the station did not report one
    pub prcp: Option<f64>,
}

impl PrecipitationReading {
    #[must_use]
    pub const fn new(date: ObservationDate, prcp: Option<f64>) -> Self {
        Self { date, prcp }
    }
}

/// Precipitation keyed by date
///
/// Several stations report on the same date, but the series keeps a single
/// value per date: readings are applied in the order given and a later reading
/// replaces an earlier one for the same date. Serializes as a JSON object of
/// `"YYYY-MM-DD"` keys in ascending date order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrecipitationSeries(BTreeMap<ObservationDate, Option<f64>>);

impl PrecipitationSeries {
    /// Collapse readings into one value per date, last write wins
    pub fn from_readings(readings: impl IntoIterator<Item = PrecipitationReading>) -> Self {
        let mut by_date = BTreeMap::new();
        for reading in readings {
            by_date.insert(reading.date, reading.prcp);
        }
        Self(by_date)
    }

    /// Value recorded for `date`
    ///
    /// The outer `Option` is `None` when the date is absent; the inner one is
    /// `None` when the date is present with a null amount.
    #[must_use]
    pub fn get(&self, date: ObservationDate) -> Option<Option<f64>> {
        self.0.get(&date).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
