//! SQLite climate store implementation
//!
//! Implements the `ClimateStorePort` over the `station` and `measurement`
//! tables. Dates are stored as zero-padded `YYYY-MM-DD` text, so every date
//! filter below is a plain string comparison.

use std::sync::Arc;

use application::{error::ApplicationError, ports::ClimateStorePort};
use async_trait::async_trait;
use domain::{
    DateRange, ObservationDate, PrecipitationReading, StationActivity, StationId,
    StationTemperatures, TemperatureReading, TemperatureSummary,
};
use rusqlite::{Connection, OptionalExtension, Row, params, types::Type};
use tracing::{debug, instrument};

use super::connection::{ConnectionPool, with_connection};
use super::error::DatabaseError;

/// SQLite-based observation store
#[derive(Debug, Clone)]
pub struct SqliteClimateStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteClimateStore {
    /// Create a new SQLite climate store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClimateStorePort for SqliteClimateStore {
    #[instrument(skip(self))]
    async fn recent_precipitation(&self) -> Result<Vec<PrecipitationReading>, ApplicationError> {
        with_connection(&self.pool, |conn| {
            let Some(latest) = latest_date(conn)? else {
                return Ok(Vec::new());
            };
            let cutoff = latest.trailing_window_start();

            let mut stmt = conn.prepare("SELECT date, prcp FROM measurement WHERE date >= ?1")?;
            let readings = stmt
                .query_map([cutoff.to_string()], |row| {
                    Ok(PrecipitationReading::new(date_column(row, 0)?, row.get(1)?))
                })?
                .collect::<Result<Vec<_>, _>>()?;

            debug!(%latest, %cutoff, count = readings.len(), "Loaded precipitation window");
            Ok(readings)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn station_ids(&self) -> Result<Vec<StationId>, ApplicationError> {
        with_connection(&self.pool, |conn| {
            let mut stmt = conn.prepare("SELECT station FROM station")?;
            let stations = stmt
                .query_map([], |row| station_column(row, 0))?
                .collect::<Result<Vec<_>, _>>()?;

            debug!(count = stations.len(), "Loaded station identifiers");
            Ok(stations)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn most_active_station_temperatures(
        &self,
    ) -> Result<Option<StationTemperatures>, ApplicationError> {
        with_connection(&self.pool, |conn| {
            let Some(activity) = most_active_station(conn)? else {
                return Ok(None);
            };
            let Some(latest) = latest_date(conn)? else {
                return Ok(None);
            };
            let window_start = latest.trailing_window_start();

            let mut stmt = conn.prepare(
                "SELECT date, tobs FROM measurement
                 WHERE station = ?1 AND date >= ?2 AND tobs IS NOT NULL",
            )?;
            let readings = stmt
                .query_map(
                    params![activity.station.as_str(), window_start.to_string()],
                    |row| Ok(TemperatureReading::new(date_column(row, 0)?, row.get(1)?)),
                )?
                .collect::<Result<Vec<_>, _>>()?;

            debug!(
                station = %activity.station,
                observations = activity.observations,
                count = readings.len(),
                "Loaded most active station temperatures"
            );

            Ok(Some(StationTemperatures {
                activity,
                window_start,
                readings,
            }))
        })
        .await
    }

    #[instrument(skip(self), fields(start = %range.start(), end = ?range.end()))]
    async fn temperature_summary(
        &self,
        range: DateRange,
    ) -> Result<TemperatureSummary, ApplicationError> {
        with_connection(&self.pool, move |conn| {
            let start = range.start().to_string();
            let end = range.end().map(|d| d.to_string());

            let summary = conn.query_row(
                "SELECT MIN(tobs), MAX(tobs), AVG(tobs) FROM measurement
                 WHERE date >= ?1 AND (?2 IS NULL OR date <= ?2)",
                params![start, end],
                |row| {
                    Ok(TemperatureSummary {
                        min: row.get(0)?,
                        max: row.get(1)?,
                        avg: row.get(2)?,
                    })
                },
            )?;

            Ok(summary)
        })
        .await
    }
}

/// Latest observation date, `None` on an empty table
fn latest_date(conn: &Connection) -> Result<Option<ObservationDate>, DatabaseError> {
    let latest: Option<String> =
        conn.query_row("SELECT MAX(date) FROM measurement", [], |row| row.get(0))?;

    latest
        .map(|raw| ObservationDate::parse(&raw).map_err(|e| conversion_error(0, e)))
        .transpose()
        .map_err(DatabaseError::from)
}

/// Station with the most observations; ties go to the lowest identifier
fn most_active_station(conn: &Connection) -> Result<Option<StationActivity>, DatabaseError> {
    let activity = conn
        .query_row(
            "SELECT station, COUNT(*) AS observations FROM measurement
             GROUP BY station
             ORDER BY observations DESC, station ASC
             LIMIT 1",
            [],
            |row| {
                Ok(StationActivity {
                    station: station_column(row, 0)?,
                    observations: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(activity)
}

fn date_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<ObservationDate> {
    let raw: String = row.get(idx)?;
    ObservationDate::parse(&raw).map_err(|e| conversion_error(idx, e))
}

fn station_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<StationId> {
    let raw: String = row.get(idx)?;
    StationId::new(raw).map_err(|e| conversion_error(idx, e))
}

fn conversion_error(idx: usize, err: domain::DomainError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}
