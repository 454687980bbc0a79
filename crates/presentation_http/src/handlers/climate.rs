//! Climate query handlers

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use domain::{PrecipitationSeries, StationId, TemperatureReading, TemperatureSummary};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Date → precipitation over the trailing year
#[instrument(skip(state))]
pub async fn precipitation(
    State(state): State<AppState>,
) -> Result<Json<PrecipitationSeries>, ApiError> {
    let series = state.climate_service.precipitation().await?;
    Ok(Json(series))
}

/// All station identifiers
#[instrument(skip(state))]
pub async fn stations(State(state): State<AppState>) -> Result<Json<Vec<StationId>>, ApiError> {
    let stations = state.climate_service.stations().await?;
    Ok(Json(stations))
}

/// Trailing-year temperatures of the most active station
#[instrument(skip(state))]
pub async fn tobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<TemperatureReading>>, ApiError> {
    let readings = state.climate_service.temperature_observations().await?;
    Ok(Json(readings))
}

/// Temperature statistics from `start` onwards
///
/// A segment that does not decode to UTF-8 is a malformed date like any other.
#[instrument(skip(state))]
pub async fn stats_from(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<TemperatureSummary>>, ApiError> {
    let Path(start) = path.map_err(|_| ApiError::InvalidDateFormat)?;
    let stats = state.climate_service.temperature_stats(&start, None).await?;
    Ok(Json(stats))
}

/// Temperature statistics between `start` and `end`, both inclusive
#[instrument(skip(state))]
pub async fn stats_between(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<Vec<TemperatureSummary>>, ApiError> {
    let Path((start, end)) = path.map_err(|_| ApiError::InvalidDateFormat)?;
    let stats = state
        .climate_service
        .temperature_stats(&start, Some(&end))
        .await?;
    Ok(Json(stats))
}
