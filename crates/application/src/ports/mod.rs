//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod climate_store;
mod database_health_port;

#[cfg(test)]
pub use climate_store::MockClimateStorePort;
pub use climate_store::ClimateStorePort;
#[cfg(test)]
pub use database_health_port::MockDatabaseHealthPort;
pub use database_health_port::{DatabaseHealth, DatabaseHealthPort, REQUIRED_TABLES};
