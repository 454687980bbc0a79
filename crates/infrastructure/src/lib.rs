//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the SQLite observation
//! store, its health check and the layered configuration.

pub mod config;
pub mod persistence;
#[cfg(test)]
pub mod testing;

pub use config::{AppConfig, ConfigError, DatabaseConfig, Environment, LogFormat, ServerConfig};
pub use persistence::{
    ConnectionPool, DatabaseError, SqliteClimateStore, SqliteDatabaseHealth, create_pool,
};
