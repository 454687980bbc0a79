//! Database connection management
//!
//! Provides a read-only SQLite connection pool via r2d2 and a helper that runs
//! one unit of blocking work on a pooled connection.

use std::{path::Path, sync::Arc, time::Duration};

use application::error::ApplicationError;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OpenFlags};
use tokio::task;
use tracing::{debug, info};

use super::error::DatabaseError;
use crate::config::DatabaseConfig;

/// How long SQLite waits on a locked database before failing a statement
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite connection pool type alias
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Pooled connection type alias
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Create a read-only connection pool over an existing database file
///
/// The file must already exist: this service never creates or migrates the
/// observation store.
pub fn create_pool(config: &DatabaseConfig) -> Result<ConnectionPool, DatabaseError> {
    info!(
        path = %config.path,
        max_connections = config.max_connections,
        "Creating read-only database connection pool"
    );

    if !Path::new(&config.path).is_file() {
        return Err(DatabaseError::NotFound(config.path.clone()));
    }

    let manager = SqliteConnectionManager::file(&config.path)
        .with_flags(
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_init(initialize_connection);

    let pool = Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(Duration::from_secs(config.connection_timeout_secs))
        .build(manager)?;

    debug!("Database connection pool created successfully");
    Ok(pool)
}

/// Per-connection settings
fn initialize_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.execute_batch("PRAGMA query_only = ON;")
}

/// Run `work` on a pooled connection inside the blocking thread pool
///
/// The connection is checked out for the duration of `work` only and goes
/// back to the pool when the closure returns, whether it succeeded or not.
pub async fn with_connection<T, F>(pool: &Arc<ConnectionPool>, work: F) -> Result<T, ApplicationError>
where
    T: Send + 'static,
    F: FnOnce(&Connection) -> Result<T, DatabaseError> + Send + 'static,
{
    let pool = Arc::clone(pool);

    task::spawn_blocking(move || {
        let conn: PooledConn = pool.get()?;
        work(&conn)
    })
    .await
    .map_err(|e| DatabaseError::Task(e.to_string()))?
    .map_err(ApplicationError::from)
}
