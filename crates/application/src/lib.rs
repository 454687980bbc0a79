//! Application layer - Use cases and orchestration
//!
//! Contains the climate query use cases and the port definitions they need.
//! Infrastructure adapters implement the ports; the HTTP layer calls the
//! services.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
