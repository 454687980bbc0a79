//! Integration tests for HTTP handlers
#![allow(clippy::expect_used)]

use std::{sync::Arc, time::Duration};

use application::{
    ClimateService,
    error::ApplicationError,
    ports::{ClimateStorePort, DatabaseHealth, DatabaseHealthPort},
};
use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use domain::{
    DateRange, PrecipitationReading, StationId, StationTemperatures, TemperatureSummary,
};
use infrastructure::{
    DatabaseConfig, ServerConfig, SqliteClimateStore, SqliteDatabaseHealth, create_pool,
};
use presentation_http::{
    REQUEST_ID_HEADER,
    routes::{create_router, with_middleware},
    state::AppState,
};
use rusqlite::{Connection, params};
use serde_json::{Value, json};
use tempfile::TempDir;

const INVALID_DATE_BODY: &str = r#"{"error":"Invalid date format. Please use YYYY-MM-DD format."}"#;

/// Seeded observation store on disk
struct Fixture {
    _dir: TempDir,
    path: String,
}

impl Fixture {
    fn create(schema: bool) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("hawaii.sqlite").display().to_string();
        let conn = Connection::open(&path).expect("open fixture");

        if schema {
            conn.execute_batch(
                "CREATE TABLE station (id INTEGER PRIMARY KEY, station TEXT, name TEXT,
                                       latitude FLOAT, longitude FLOAT, elevation FLOAT);
                 CREATE TABLE measurement (id INTEGER PRIMARY KEY, station TEXT, date TEXT,
                                           prcp FLOAT, tobs FLOAT);",
            )
            .expect("schema");
        } else {
            conn.execute_batch("VACUUM;").expect("init file");
        }

        Self { _dir: dir, path }
    }

    /// USC001 has ten observations in the last days of the data set, USC002
    /// five (two of them older than a year), USC003 two.
    fn seeded() -> Self {
        let fixture = Self::create(true);
        let conn = Connection::open(&fixture.path).expect("open fixture");

        for station in ["USC001", "USC002", "USC003"] {
            conn.execute(
                "INSERT INTO station (station, name) VALUES (?1, ?2)",
                params![station, format!("{station} station, HI US")],
            )
            .expect("insert station");
        }

        let mut rows: Vec<(&str, String, Option<f64>, f64)> = (14..=23)
            .map(|day| {
                let prcp = if day == 20 { None } else { Some(f64::from(day) / 100.0) };
                ("USC001", format!("2017-08-{day}"), prcp, 70.0 + f64::from(day - 14))
            })
            .collect();
        rows.extend([
            ("USC002", "2016-01-01".to_string(), Some(2.5), 55.0),
            ("USC002", "2016-08-22".to_string(), Some(1.0), 60.0),
            ("USC002", "2016-08-23".to_string(), Some(0.7), 62.0),
            ("USC002", "2017-02-01".to_string(), Some(0.2), 64.0),
            ("USC002", "2017-08-23".to_string(), Some(0.45), 85.0),
            ("USC003", "2017-01-01".to_string(), None, 58.0),
            ("USC003", "2017-01-01".to_string(), Some(0.3), 66.0),
        ]);

        for (station, date, prcp, tobs) in rows {
            conn.execute(
                "INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)",
                params![station, date, prcp, tobs],
            )
            .expect("insert measurement");
        }

        fixture
    }

    fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            path: self.path.clone(),
            max_connections: 4,
            connection_timeout_secs: 1,
        }
    }
}

fn state_with(
    store: Arc<dyn ClimateStorePort>,
    database_health: Arc<dyn DatabaseHealthPort>,
) -> AppState {
    AppState {
        climate_service: Arc::new(ClimateService::new(store)),
        database_health,
    }
}

fn create_test_server(fixture: &Fixture) -> TestServer {
    let pool = Arc::new(create_pool(&fixture.database_config()).expect("pool"));
    let state = state_with(
        Arc::new(SqliteClimateStore::new(Arc::clone(&pool))),
        Arc::new(SqliteDatabaseHealth::new(pool)),
    );
    let app = with_middleware(create_router(state), &ServerConfig::default());
    TestServer::new(app).expect("Failed to create test server")
}

/// Store whose every call fails the way an exhausted pool does
struct UnavailableStore;

#[async_trait]
impl ClimateStorePort for UnavailableStore {
    async fn recent_precipitation(&self) -> Result<Vec<PrecipitationReading>, ApplicationError> {
        Err(unavailable())
    }

    async fn station_ids(&self) -> Result<Vec<StationId>, ApplicationError> {
        Err(unavailable())
    }

    async fn most_active_station_temperatures(
        &self,
    ) -> Result<Option<StationTemperatures>, ApplicationError> {
        Err(unavailable())
    }

    async fn temperature_summary(
        &self,
        _range: DateRange,
    ) -> Result<TemperatureSummary, ApplicationError> {
        Err(unavailable())
    }
}

#[async_trait]
impl DatabaseHealthPort for UnavailableStore {
    async fn check_health(&self) -> Result<DatabaseHealth, ApplicationError> {
        Ok(DatabaseHealth::unreachable())
    }
}

fn unavailable() -> ApplicationError {
    ApplicationError::StoreUnavailable("timed out waiting for connection".to_string())
}

/// Store that answers the station list only after a long stall
struct StalledStore;

#[async_trait]
impl ClimateStorePort for StalledStore {
    async fn recent_precipitation(&self) -> Result<Vec<PrecipitationReading>, ApplicationError> {
        Err(unavailable())
    }

    async fn station_ids(&self) -> Result<Vec<StationId>, ApplicationError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(Vec::new())
    }

    async fn most_active_station_temperatures(
        &self,
    ) -> Result<Option<StationTemperatures>, ApplicationError> {
        Err(unavailable())
    }

    async fn temperature_summary(
        &self,
        _range: DateRange,
    ) -> Result<TemperatureSummary, ApplicationError> {
        Err(unavailable())
    }
}

// ============================================================================
// Index & Health
// ============================================================================

#[tokio::test]
async fn index_lists_routes() {
    let fixture = Fixture::seeded();
    let server = create_test_server(&fixture);

    let response = server.get("/").await;

    response.assert_status_ok();
    let text = response.text();
    assert!(text.starts_with("Available Routes:"));
    assert!(text.contains("/api/v1.0/precipitation"));
    assert!(text.contains("/api/v1.0/&lt;start&gt;/&lt;end&gt;"));
}

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let fixture = Fixture::seeded();
    let server = create_test_server(&fixture);

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn ready_endpoint_reports_database() {
    let fixture = Fixture::seeded();
    let server = create_test_server(&fixture);

    let response = server.get("/ready").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ready"], true);
    assert!(body["database"]["version"].as_str().expect("version").starts_with("SQLite"));
}

#[tokio::test]
async fn ready_endpoint_unavailable_without_tables() {
    let fixture = Fixture::create(false);
    let server = create_test_server(&fixture);

    let response = server.get("/ready").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["ready"], false);
    assert_eq!(body["database"]["missing_tables"], json!(["station", "measurement"]));
}

// ============================================================================
// Climate Queries
// ============================================================================

#[tokio::test]
async fn precipitation_keys_fall_in_trailing_year() {
    let fixture = Fixture::seeded();
    let server = create_test_server(&fixture);

    let response = server.get("/api/v1.0/precipitation").await;

    response.assert_status_ok();
    let body: Value = response.json();
    let map = body.as_object().expect("object");
    assert!(map.keys().all(|date| date.as_str() >= "2016-08-23"));
    assert!(map.contains_key("2016-08-23"));
    assert!(!map.contains_key("2016-08-22"));
    // Later rows win for a shared date
    assert_eq!(map["2017-01-01"], json!(0.3));
    assert_eq!(map["2017-08-23"], json!(0.45));
    assert_eq!(map["2017-08-20"], Value::Null);
}

#[tokio::test]
async fn stations_match_station_table() {
    let fixture = Fixture::seeded();
    let server = create_test_server(&fixture);

    let response = server.get("/api/v1.0/stations").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!(["USC001", "USC002", "USC003"]));
}

#[tokio::test]
async fn tobs_come_from_most_active_station() {
    let fixture = Fixture::seeded();
    let server = create_test_server(&fixture);

    let response = server.get("/api/v1.0/tobs").await;

    response.assert_status_ok();
    let body: Value = response.json();
    let records = body.as_array().expect("array");
    assert_eq!(records.len(), 10);
    assert_eq!(records[0], json!({"date": "2017-08-14", "tobs": 70.0}));
    // USC002's 85.0 on the same final date is not included
    assert!(records.iter().all(|r| r["tobs"].as_f64().expect("tobs") < 80.0));
}

#[tokio::test]
async fn stats_from_start() {
    let fixture = Fixture::seeded();
    let server = create_test_server(&fixture);

    let response = server.get("/api/v1.0/2017-08-23").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!([{"TMIN": 79.0, "TMAX": 85.0, "TAVG": 82.0}]));
}

#[tokio::test]
async fn stats_between_single_day() {
    let fixture = Fixture::seeded();
    let server = create_test_server(&fixture);

    let response = server.get("/api/v1.0/2017-01-01/2017-01-01").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!([{"TMIN": 58.0, "TMAX": 66.0, "TAVG": 62.0}]));
}

#[tokio::test]
async fn stats_without_matches_are_null() {
    let fixture = Fixture::seeded();
    let server = create_test_server(&fixture);

    let response = server.get("/api/v1.0/2030-01-01").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!([{"TMIN": null, "TMAX": null, "TAVG": null}]));
}

#[tokio::test]
async fn invalid_start_is_rejected_with_exact_body() {
    let fixture = Fixture::seeded();
    let server = create_test_server(&fixture);

    for path in ["/api/v1.0/not-a-date", "/api/v1.0/2017-8-23", "/api/v1.0/2017-02-30"] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.text(), INVALID_DATE_BODY, "{path}");
    }
}

#[tokio::test]
async fn slash_separated_date_is_rejected() {
    let fixture = Fixture::seeded();
    let server = create_test_server(&fixture);

    // An encoded slash stays in one path segment and reaches the date check
    let response = server.get("/api/v1.0/2017%2F08%2F23").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), INVALID_DATE_BODY);
}

#[tokio::test]
async fn invalid_end_is_rejected_with_exact_body() {
    let fixture = Fixture::seeded();
    let server = create_test_server(&fixture);

    let response = server.get("/api/v1.0/2017-01-01/tomorrow").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), INVALID_DATE_BODY);
}

#[tokio::test]
async fn non_utf8_start_is_rejected_with_exact_body() {
    let fixture = Fixture::seeded();
    let server = create_test_server(&fixture);

    let response = server.get("/api/v1.0/%FF").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), INVALID_DATE_BODY);
}

#[tokio::test]
async fn non_utf8_end_is_rejected_with_exact_body() {
    let fixture = Fixture::seeded();
    let server = create_test_server(&fixture);

    // A lone lead byte of a two-byte sequence
    let response = server.get("/api/v1.0/2017-01-01/%C3").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), INVALID_DATE_BODY);
}

#[tokio::test]
async fn repeated_calls_are_identical() {
    let fixture = Fixture::seeded();
    let server = create_test_server(&fixture);

    for path in ["/api/v1.0/precipitation", "/api/v1.0/tobs", "/api/v1.0/2016-08-23"] {
        let first: Value = server.get(path).await.json();
        let second: Value = server.get(path).await.json();
        assert_eq!(first, second, "{path}");
    }
}

#[tokio::test]
async fn empty_tables_give_empty_results() {
    let fixture = Fixture::create(true);
    let server = create_test_server(&fixture);

    let precipitation: Value = server.get("/api/v1.0/precipitation").await.json();
    assert_eq!(precipitation, json!({}));

    let stations: Value = server.get("/api/v1.0/stations").await.json();
    assert_eq!(stations, json!([]));

    let tobs: Value = server.get("/api/v1.0/tobs").await.json();
    assert_eq!(tobs, json!([]));

    let stats: Value = server.get("/api/v1.0/2017-01-01").await.json();
    assert_eq!(stats, json!([{"TMIN": null, "TMAX": null, "TAVG": null}]));
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn unavailable_store_is_internal_server_error() {
    let state = state_with(Arc::new(UnavailableStore), Arc::new(UnavailableStore));
    let server = TestServer::new(create_router(state)).expect("Failed to create test server");

    let response = server.get("/api/v1.0/stations").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["code"], "store_unavailable");
}

#[tokio::test]
async fn stalled_request_times_out() {
    let state = state_with(Arc::new(StalledStore), Arc::new(UnavailableStore));
    let server_config = ServerConfig {
        request_timeout_secs: 1,
        ..ServerConfig::default()
    };
    let app = with_middleware(create_router(state), &server_config);
    let server = TestServer::new(app).expect("Failed to create test server");

    let response = server.get("/api/v1.0/stations").await;

    response.assert_status(StatusCode::REQUEST_TIMEOUT);
    assert!(response.maybe_header(REQUEST_ID_HEADER).is_some());
}

#[tokio::test]
async fn unreachable_store_is_not_ready() {
    let state = state_with(Arc::new(UnavailableStore), Arc::new(UnavailableStore));
    let server = TestServer::new(create_router(state)).expect("Failed to create test server");

    let response = server.get("/ready").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["database"]["reachable"], false);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let fixture = Fixture::seeded();
    let server = create_test_server(&fixture);

    let response = server.get("/api/v2.0/stations/extra/segments").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

// ============================================================================
// Request IDs
// ============================================================================

#[tokio::test]
async fn request_id_is_generated() {
    let fixture = Fixture::seeded();
    let server = create_test_server(&fixture);

    let response = server.get("/health").await;

    let id = response.header(REQUEST_ID_HEADER);
    let id = uuid::Uuid::parse_str(id.to_str().expect("ascii")).expect("uuid");
    assert_eq!(id.get_version_num(), 7);
}

#[tokio::test]
async fn request_id_is_echoed() {
    let fixture = Fixture::seeded();
    let server = create_test_server(&fixture);

    let response = server
        .get("/api/v1.0/stations")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("client-trace-42"),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(response.header(REQUEST_ID_HEADER), "client-trace-42");
}

#[tokio::test]
async fn oversized_request_id_is_replaced() {
    let fixture = Fixture::seeded();
    let server = create_test_server(&fixture);
    let oversized = "a".repeat(200);

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_str(&oversized).expect("header"),
        )
        .await;

    assert_ne!(response.header(REQUEST_ID_HEADER), oversized.as_str());
}
