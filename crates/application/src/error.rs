//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error (invalid caller input)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The observation store could not be reached
    #[error("Observation store unavailable: {0}")]
    StoreUnavailable(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error was caused by the caller's input
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}
