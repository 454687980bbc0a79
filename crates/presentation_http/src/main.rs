//! Climate API HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use application::{
    ClimateService,
    ports::{ClimateStorePort, DatabaseHealthPort},
};
use infrastructure::{AppConfig, LogFormat, SqliteClimateStore, SqliteDatabaseHealth, create_pool};
use presentation_http::{
    Shutdown, error::set_expose_internal_errors, routes, serve_until, state::AppState,
};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str =
    "climate_api_server=debug,presentation_http=debug,infrastructure=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config comes first: it decides the log format
    let config = AppConfig::load()?;
    init_tracing(config.server.log_format);

    info!("🌺 Climate API v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        environment = %config.environment,
        host = %config.server.host,
        port = %config.server.port,
        database = %config.database.path,
        "Configuration loaded"
    );

    set_expose_internal_errors(!config.is_production());

    // Open the observation store; a missing file is fatal
    let pool = Arc::new(
        create_pool(&config.database)
            .map_err(|e| anyhow::anyhow!("Failed to open observation store: {e}"))?,
    );

    let store: Arc<dyn ClimateStorePort> = Arc::new(SqliteClimateStore::new(Arc::clone(&pool)));
    let database_health: Arc<dyn DatabaseHealthPort> =
        Arc::new(SqliteDatabaseHealth::new(Arc::clone(&pool)));

    let state = AppState {
        climate_service: Arc::new(ClimateService::new(store)),
        database_health,
    };

    let app = routes::with_middleware(routes::create_router(state), &config.server);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    match serve_until(listener, app, shutdown_signal(), shutdown_timeout).await? {
        Shutdown::Drained => info!("👋 Server shutdown complete"),
        Shutdown::DeadlineElapsed => warn!("👋 Server stopped with requests still in flight"),
    }

    Ok(())
}

/// Install the global subscriber in the configured format
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
