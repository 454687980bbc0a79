//! Climate query service - precipitation, stations and temperature use cases

use std::{fmt, sync::Arc, time::Instant};

use domain::{DateRange, PrecipitationSeries, StationId, TemperatureReading, TemperatureSummary};
use tracing::{debug, instrument, warn};

use crate::{error::ApplicationError, ports::ClimateStorePort};

/// Service answering the read-only climate queries
///
/// Holds no per-request state; one instance is built at startup and shared.
pub struct ClimateService {
    store: Arc<dyn ClimateStorePort>,
}

impl fmt::Debug for ClimateService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClimateService").finish_non_exhaustive()
    }
}

impl ClimateService {
    /// Create a new climate service backed by the given store
    pub fn new(store: Arc<dyn ClimateStorePort>) -> Self {
        Self { store }
    }

    /// Precipitation over the trailing year, one value per date
    ///
    /// Dates reported by several stations keep the value of the last row the
    /// store returned for that date.
    #[instrument(skip(self))]
    pub async fn precipitation(&self) -> Result<PrecipitationSeries, ApplicationError> {
        let start = Instant::now();
        let readings = self.store.recent_precipitation().await?;
        let row_count = readings.len();

        if readings.is_empty() {
            warn!("No observations available for the precipitation window");
        }

        let series = PrecipitationSeries::from_readings(readings);

        debug!(
            rows = row_count,
            dates = series.len(),
            latency_ms = elapsed_ms(start),
            "Precipitation series built"
        );

        Ok(series)
    }

    /// Every station identifier, in store order
    #[instrument(skip(self))]
    pub async fn stations(&self) -> Result<Vec<StationId>, ApplicationError> {
        let stations = self.store.station_ids().await?;
        debug!(count = stations.len(), "Stations listed");
        Ok(stations)
    }

    /// Trailing-year temperatures of the most active station
    #[instrument(skip(self))]
    pub async fn temperature_observations(
        &self,
    ) -> Result<Vec<TemperatureReading>, ApplicationError> {
        let Some(recent) = self.store.most_active_station_temperatures().await? else {
            warn!("No observations available, returning no temperatures");
            return Ok(Vec::new());
        };

        debug!(
            station = %recent.activity.station,
            observations = recent.activity.observations,
            window_start = %recent.window_start,
            readings = recent.readings.len(),
            "Most active station temperatures loaded"
        );

        Ok(recent.readings)
    }

    /// Temperature statistics from `start` through the optional `end`
    ///
    /// Both bounds must be `YYYY-MM-DD` dates. The result always holds exactly
    /// one summary; its fields are `None` when no observation matched.
    #[instrument(skip(self))]
    pub async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<Vec<TemperatureSummary>, ApplicationError> {
        let range = DateRange::parse(start, end)?;

        if range.is_inverted() {
            debug!(%start, ?end, "Range end precedes start, summary will be empty");
        }

        let summary = self.store.temperature_summary(range).await?;

        debug!(
            min = ?summary.min,
            max = ?summary.max,
            avg = ?summary.avg,
            "Temperature summary computed"
        );

        Ok(vec![summary])
    }
}

#[allow(clippy::cast_possible_truncation)]
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
