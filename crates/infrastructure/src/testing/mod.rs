//! Testing utilities for infrastructure unit tests.
//!
//! Read-only pools cannot share an in-memory database, so fixtures seed a
//! throwaway SQLite file laid out like the Hawaii observation store.

mod climate_fixture;

pub use climate_fixture::ClimateFixture;
