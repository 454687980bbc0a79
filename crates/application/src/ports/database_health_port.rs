//! Observation store health port
//!
//! Lets the readiness check inspect the store without knowing it is SQLite.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::Serialize;

use crate::error::ApplicationError;

/// Tables the climate queries read from
pub const REQUIRED_TABLES: [&str; 2] = ["station", "measurement"];

/// Result of probing the observation store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseHealth {
    /// Whether a connection could be obtained and queried
    pub reachable: bool,
    /// Engine version (if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Open connections held by the pool
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_size: Option<u32>,
    /// Health check latency in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    /// Required tables that the store does not have
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_tables: Vec<String>,
}

impl DatabaseHealth {
    /// Reachable store with an engine version
    #[must_use]
    pub fn reachable(version: impl Into<String>) -> Self {
        Self {
            reachable: true,
            version: Some(version.into()),
            pool_size: None,
            response_time_ms: None,
            missing_tables: Vec::new(),
        }
    }

    /// Store that could not be reached
    #[must_use]
    pub const fn unreachable() -> Self {
        Self {
            reachable: false,
            version: None,
            pool_size: None,
            response_time_ms: None,
            missing_tables: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_response_time(mut self, ms: u64) -> Self {
        self.response_time_ms = Some(ms);
        self
    }

    #[must_use]
    pub const fn with_pool_size(mut self, size: u32) -> Self {
        self.pool_size = Some(size);
        self
    }

    #[must_use]
    pub fn with_missing_tables(mut self, tables: Vec<String>) -> Self {
        self.missing_tables = tables;
        self
    }

    /// Reachable and carrying every table in [`REQUIRED_TABLES`]
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.reachable && self.missing_tables.is_empty()
    }
}

/// Port for observation store health checks
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DatabaseHealthPort: Send + Sync {
    /// Check connectivity, engine version and schema presence
    ///
    /// Returns `Ok` with `reachable: false` rather than an error when the
    /// store cannot be opened; errors are reserved for failed checks.
    async fn check_health(&self) -> Result<DatabaseHealth, ApplicationError>;
}
