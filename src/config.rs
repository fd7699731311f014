use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    /// Applied as `statement_timeout` on every pooled connection.
    pub command_timeout: Duration,
    pub acquire_timeout: Duration,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub log_level: String,
    pub host: String,
    pub port: u16,
    pub db: DbConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let db = DbConfig {
            url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://postgres:postgres@db:5432/myapp".into()),
            min_connections: env_parse("DB_MIN_CONNECTIONS").unwrap_or(2),
            max_connections: env_parse("DB_MAX_CONNECTIONS").unwrap_or(10),
            command_timeout: Duration::from_secs(env_parse("DB_COMMAND_TIMEOUT_SECS").unwrap_or(60)),
            acquire_timeout: Duration::from_secs(
                env_parse("DB_ACQUIRE_TIMEOUT_SECS").unwrap_or(60 * 60 * 24),
            ),
            run_migrations: env_parse("RUN_MIGRATIONS").unwrap_or(true),
        };
        let port = match std::env::var("APP_PORT") {
            Ok(v) => v.parse()?,
            Err(_) => 8000,
        };
        Ok(Self {
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "INFO".into()),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
            db,
        })
    }

    /// `tracing` filter directive derived from `LOG_LEVEL` (`INFO` -> `info`).
    pub fn log_directive(&self) -> String {
        match self.log_level.to_ascii_lowercase().as_str() {
            "warning" => "warn".into(),
            "critical" | "fatal" => "error".into(),
            other => other.to_string(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}
