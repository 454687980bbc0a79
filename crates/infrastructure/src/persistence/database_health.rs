//! SQLite database health adapter
//!
//! Implements the `DatabaseHealthPort` for the observation store using the
//! connection pool.

use std::{sync::Arc, time::Instant};

use application::error::ApplicationError;
use application::ports::{DatabaseHealth, DatabaseHealthPort, REQUIRED_TABLES};
use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, instrument, warn};

use super::{ConnectionPool, DatabaseError};

/// SQLite database health adapter
pub struct SqliteDatabaseHealth {
    pool: Arc<ConnectionPool>,
}

impl std::fmt::Debug for SqliteDatabaseHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteDatabaseHealth")
            .field("pool", &"<ConnectionPool>")
            .finish()
    }
}

impl SqliteDatabaseHealth {
    /// Create a new database health adapter with the given connection pool
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

/// Version string and the required tables that are absent
fn inspect_schema(conn: &Connection) -> Result<(String, Vec<String>), DatabaseError> {
    let version: String = conn.query_row("SELECT sqlite_version()", [], |row| row.get(0))?;

    let mut missing = Vec::new();
    for table in REQUIRED_TABLES {
        let found = conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        if found.is_none() {
            missing.push(table.to_string());
        }
    }

    Ok((version, missing))
}

#[async_trait]
impl DatabaseHealthPort for SqliteDatabaseHealth {
    #[instrument(skip(self))]
    async fn check_health(&self) -> Result<DatabaseHealth, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let start = Instant::now();

        let result = tokio::task::spawn_blocking(move || {
            let conn = match pool.get() {
                Ok(conn) => conn,
                Err(e) => return Ok(Err(e)),
            };
            let inspected = inspect_schema(&conn)?;
            Ok::<_, DatabaseError>(Ok((inspected, pool.state().connections)))
        })
        .await
        .map_err(|e| {
            ApplicationError::Internal(format!("Database health check task failed: {e}"))
        })??;

        // Check latency is bounded by the pool checkout timeout
        #[allow(clippy::cast_possible_truncation)]
        let response_time_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(((version, missing), pool_size)) => {
                if missing.is_empty() {
                    debug!(%version, pool_size, response_time_ms, "Database health check passed");
                } else {
                    warn!(?missing, "Observation store is missing required tables");
                }

                Ok(DatabaseHealth::reachable(format!("SQLite {version}"))
                    .with_pool_size(pool_size)
                    .with_response_time(response_time_ms)
                    .with_missing_tables(missing))
            },
            Err(e) => {
                warn!(error = %e, "Database health check failed: no connection");
                Ok(DatabaseHealth::unreachable().with_response_time(response_time_ms))
            },
        }
    }
}
