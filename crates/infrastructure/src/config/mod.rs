//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `database`: SQLite observation store settings
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `CLIMATE_`-prefixed environment variables (`CLIMATE_SERVER__PORT=8080`,
//! `CLIMATE_DATABASE__PATH=/data/hawaii.sqlite`).

mod database;
mod server;

use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use database::DatabaseConfig;
pub use server::{LogFormat, ServerConfig};

/// Environment variable naming an alternative config file
pub const CONFIG_FILE_ENV: &str = "CLIMATE_CONFIG";

/// Config file looked up when `CLIMATE_CONFIG` is unset (extension optional)
const DEFAULT_CONFIG_FILE: &str = "config";

/// Prefix of environment variable overrides
const ENV_PREFIX: &str = "CLIMATE";

/// Configuration loading or validation failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Application environment (development or production)
///
/// Production hides internal error details from API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - error details are exposed
    #[default]
    Development,
    /// Production environment - error details are hidden
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Observation store configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from the optional config file and the environment
    ///
    /// The file is `$CLIMATE_CONFIG` when set, otherwise `config.{toml,…}` in
    /// the working directory; a missing file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        let file = std::env::var(CONFIG_FILE_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.into());
        let source = config::File::with_name(&file).required(false);
        Self::from_sources(source, true)
    }

    /// Load configuration from an explicit file, ignoring the environment
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = config::File::from(path).required(true);
        Self::from_sources(source, false)
    }

    fn from_sources(
        file: config::File<config::FileSourceFile, config::FileFormat>,
        with_env: bool,
    ) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .add_source(file);

        if with_env {
            builder = builder.add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            );
        }

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Semantic checks serde cannot express; reports every problem at once
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        if self.database.path.trim().is_empty() {
            problems.push("database.path must not be empty".to_string());
        }
        if self.database.max_connections == 0 {
            problems.push("database.max_connections must be at least 1".to_string());
        }
        if self.database.connection_timeout_secs == 0 {
            problems.push("database.connection_timeout_secs must be at least 1".to_string());
        }
        if self.server.request_timeout_secs == 0 {
            problems.push("server.request_timeout_secs must be at least 1".to_string());
        }
        if self.server.host.trim().is_empty() {
            problems.push("server.host must not be empty".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems))
        }
    }

    /// Whether the service runs in production mode
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self.environment, Environment::Production)
    }
}
