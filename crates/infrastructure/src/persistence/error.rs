//! Persistence errors and their mapping onto application errors

use application::error::ApplicationError;
use thiserror::Error;

/// Database errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Database not found: {0}")]
    NotFound(String),

    #[error("Blocking task failed: {0}")]
    Task(String),
}

/// Pool checkouts and missing files mean the store is unreachable; anything
/// else is a failed query.
impl From<DatabaseError> for ApplicationError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Pool(e) => Self::StoreUnavailable(e.to_string()),
            DatabaseError::NotFound(path) => Self::StoreUnavailable(format!("missing database {path}")),
            DatabaseError::Sqlite(e) => Self::Internal(format!("Database error: {e}")),
            DatabaseError::Task(msg) => Self::Internal(msg),
        }
    }
}
