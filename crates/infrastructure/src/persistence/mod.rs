//! Persistence module
//!
//! Read-only SQLite access to the `station` and `measurement` tables.

pub mod climate_store;
pub mod connection;
pub mod database_health;
pub mod error;

pub use climate_store::SqliteClimateStore;
pub use connection::{ConnectionPool, create_pool};
pub use database_health::SqliteDatabaseHealth;
pub use error::DatabaseError;
