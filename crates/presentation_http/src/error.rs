//! API error handling
//!
//! Maps application failures to JSON error bodies. In production mode the
//! `details` field is left out of 500 responses.

use std::sync::atomic::{AtomicBool, Ordering};

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Message returned for any malformed date path segment
pub const INVALID_DATE_MESSAGE: &str = "Invalid date format. Please use YYYY-MM-DD format.";

/// Global flag to control error detail exposure
/// Set to false in production to prevent information leakage
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

/// Configure whether internal error details should be exposed in responses.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

/// Check if internal error details should be exposed
fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid date format")]
    InvalidDateFormat,

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// HTTP status for this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidDateFormat => StatusCode::BAD_REQUEST,
            Self::StoreUnavailable(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self, expose: bool) -> ErrorResponse {
        match self {
            // Clients match on this exact body, so it carries no code
            Self::InvalidDateFormat => ErrorResponse {
                error: INVALID_DATE_MESSAGE.to_string(),
                code: None,
                details: None,
            },
            Self::StoreUnavailable(msg) => ErrorResponse {
                error: "Observation store unavailable".to_string(),
                code: Some("store_unavailable".to_string()),
                details: expose.then(|| msg.clone()),
            },
            Self::Internal(msg) => ErrorResponse {
                error: "An internal error occurred".to_string(),
                code: Some("internal_error".to_string()),
                details: expose.then(|| msg.clone()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::StoreUnavailable(msg) => warn!(error = %msg, "Observation store unavailable"),
            Self::Internal(msg) => error!(error = %msg, "Request failed"),
            Self::InvalidDateFormat => {},
        }

        (self.status(), Json(self.body(should_expose_details()))).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(DomainError::InvalidDateFormat(_)) => Self::InvalidDateFormat,
            // Station ids only come from stored rows, so a bad one is a server fault
            ApplicationError::Domain(e @ DomainError::InvalidStationId(_)) => {
                Self::Internal(e.to_string())
            },
            ApplicationError::StoreUnavailable(msg) => Self::StoreUnavailable(msg),
            ApplicationError::Internal(msg) => Self::Internal(msg),
        }
    }
}
