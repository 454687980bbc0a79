//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Input does not match the `YYYY-MM-DD` calendar date shape
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    /// Station identifier is empty or blank
    #[error("Invalid station identifier: {0:?}")]
    InvalidStationId(String),
}
