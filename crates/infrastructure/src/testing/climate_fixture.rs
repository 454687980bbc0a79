//! Temporary observation store files for tests.

use rusqlite::{Connection, params};
use tempfile::TempDir;

/// Schema of the Hawaii observation store
pub const SCHEMA: &str = "
    CREATE TABLE station (
        id INTEGER PRIMARY KEY,
        station TEXT,
        name TEXT,
        latitude FLOAT,
        longitude FLOAT,
        elevation FLOAT
    );
    CREATE TABLE measurement (
        id INTEGER PRIMARY KEY,
        station TEXT,
        date TEXT,
        prcp FLOAT,
        tobs FLOAT
    );
";

/// A measurement row: station, date, precipitation, temperature
pub type MeasurementRow<'a> = (&'a str, &'a str, Option<f64>, f64);

/// SQLite file in a temporary directory, removed on drop.
#[derive(Debug)]
pub struct ClimateFixture {
    _dir: TempDir,
    path: String,
}

impl ClimateFixture {
    /// Store with the given stations and measurements, inserted in order.
    pub fn new(stations: &[&str], measurements: &[MeasurementRow<'_>]) -> Self {
        let fixture = Self::without_schema();
        let conn = Connection::open(&fixture.path).unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        for (i, station) in stations.iter().enumerate() {
            conn.execute(
                "INSERT INTO station (station, name, latitude, longitude, elevation)
                 VALUES (?1, ?2, 21.3, -157.8, 3.0)",
                params![station, format!("Station {i}")],
            )
            .unwrap();
        }
        for (station, date, prcp, tobs) in measurements {
            conn.execute(
                "INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)",
                params![station, date, prcp, tobs],
            )
            .unwrap();
        }

        fixture
    }

    /// Store with both tables and no rows.
    pub fn empty() -> Self {
        Self::new(&[], &[])
    }

    /// Valid SQLite file without any tables.
    pub fn without_schema() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hawaii.sqlite").display().to_string();
        // Opening read-write creates the file; VACUUM forces the header out
        Connection::open(&path)
            .unwrap()
            .execute_batch("VACUUM;")
            .unwrap();
        Self { _dir: dir, path }
    }

    /// Path of the database file.
    pub fn path(&self) -> &str {
        &self.path
    }
}
