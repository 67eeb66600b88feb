//! Server configuration.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use visit_store::RetryPolicy;

/// Which storage backend `DATABASE_URL` selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    /// Process-local store, lost on restart.
    Memory,
    /// SQLite file or in-memory database.
    Sqlite,
    /// PostgreSQL server.
    Postgres,
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Database URL, or `memory` for the in-memory store.
    pub database_url: String,
    /// Directory served for stylesheets and other assets.
    pub static_dir: PathBuf,
    /// Attempts made for the initial database connection.
    pub db_connect_retries: u32,
    /// Delay between connection attempts.
    pub db_retry_delay: Duration,
    /// Whether to seed the bundled country catalog at startup.
    pub seed_catalog: bool,
    /// Log level.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: "sqlite:travel.db?mode=rwc".to_string(),
            static_dir: PathBuf::from("public"),
            db_connect_retries: 5,
            db_retry_delay: Duration::from_millis(5000),
            seed_catalog: true,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(port) => port
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid port number, got {port:?}"))?,
            Err(_) => defaults.port,
        };

        let config = Self {
            host: env::var("TRACKER_SERVER_HOST").unwrap_or(defaults.host),
            port,
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            static_dir: env::var("TRACKER_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            db_connect_retries: env::var("TRACKER_DB_CONNECT_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.db_connect_retries),
            db_retry_delay: env::var("TRACKER_DB_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.db_retry_delay),
            seed_catalog: env::var("TRACKER_SEED_CATALOG")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.seed_catalog),
            log_level: env::var("TRACKER_LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        if config.database_kind().is_none() {
            anyhow::bail!(
                "DATABASE_URL must be `memory`, a sqlite: URL or a postgres:// URL"
            );
        }

        Ok(config)
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the backend selected by the database URL.
    pub fn database_kind(&self) -> Option<DatabaseKind> {
        let url = self.database_url.as_str();
        if url == "memory" {
            Some(DatabaseKind::Memory)
        } else if url.starts_with("sqlite:") {
            Some(DatabaseKind::Sqlite)
        } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Some(DatabaseKind::Postgres)
        } else {
            None
        }
    }

    /// Returns the retry policy for the initial database connection.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.db_connect_retries,
            delay: self.db_retry_delay,
        }
    }
}
