//! Domain layer for the climate observations API
//!
//! Contains the read models, value objects and domain errors describing
//! weather stations and their dated observations. The observation store owns
//! the data; nothing in this layer creates or mutates it.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
