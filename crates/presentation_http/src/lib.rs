//! Climate API HTTP presentation layer
//!
//! Serves the read-only climate observation queries over axum.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use middleware::{REQUEST_ID_HEADER, RequestIdLayer};
pub use routes::{create_router, with_middleware};
pub use server::{Shutdown, serve_until};
pub use state::AppState;
