//! Observation store port
//!
//! Read-only access to the station and measurement tables. Each method is a
//! single unit of work: an adapter acquires one connection for the call and
//! releases it before returning, whatever the outcome.

use async_trait::async_trait;
use domain::{DateRange, PrecipitationReading, StationId, StationTemperatures, TemperatureSummary};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for querying climate observations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClimateStorePort: Send + Sync {
    /// Precipitation readings of every station inside the trailing window
    ///
    /// The window ends at the latest observation date in the store and starts
    /// `TRAILING_WINDOW_DAYS` earlier, both ends inclusive. Readings come back
    /// in store order. An empty store yields an empty list.
    async fn recent_precipitation(&self) -> Result<Vec<PrecipitationReading>, ApplicationError>;

    /// All station identifiers in store order
    async fn station_ids(&self) -> Result<Vec<StationId>, ApplicationError>;

    /// Trailing-window temperatures of the station with the most observations
    ///
    /// Ties on the observation count go to the lowest station identifier.
    /// Returns `None` when the store has no observations.
    async fn most_active_station_temperatures(
        &self,
    ) -> Result<Option<StationTemperatures>, ApplicationError>;

    /// Minimum, maximum and average temperature over the inclusive range
    async fn temperature_summary(
        &self,
        range: DateRange,
    ) -> Result<TemperatureSummary, ApplicationError>;
}
