use std::str::FromStr;

use anyhow::Context;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use tracing::{info, warn};

use crate::{config::DbConfig, store::StoreError};

/// Owns the connection pool for the life of the process: opened in
/// [`Database::connect`] at startup, released by [`Database::close`] at shutdown.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn connect(cfg: &DbConfig) -> anyhow::Result<Self> {
        info!(
            min = cfg.min_connections,
            max = cfg.max_connections,
            "connecting to database"
        );
        let pool = pool_options(cfg)
            .connect_with(connect_options(cfg)?)
            .await
            .context("connect to database")?;
        info!("database connection pool created");

        let version: String = sqlx::query_scalar("SELECT version()")
            .fetch_one(&pool)
            .await
            .context("query server version")?;
        info!(%version, "connected to database");

        Ok(Self { pool })
    }

    /// Pool that opens connections on first use.
    #[cfg(test)]
    pub fn lazy(cfg: &DbConfig) -> anyhow::Result<Self> {
        let pool = pool_options(cfg).connect_lazy_with(connect_options(cfg)?);
        Ok(Self { pool })
    }

    /// The live pool, or [`StoreError::NotInitialized`] once shutdown has begun.
    pub fn pool(&self) -> Result<&PgPool, StoreError> {
        if self.pool.is_closed() {
            return Err(StoreError::NotInitialized);
        }
        Ok(&self.pool)
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(self.pool()?).await?;
        Ok(())
    }

    pub async fn migrate(&self) {
        let pool = match self.pool() {
            Ok(pool) => pool,
            Err(e) => {
                warn!(error = %e, "skipping migrations");
                return;
            }
        };
        match sqlx::migrate!("./migrations").run(pool).await {
            Ok(()) => info!("migrations applied"),
            Err(e) => warn!(error = %e, "migration failed; continuing"),
        }
    }

    /// Waits until every connection has been returned and closed.
    pub async fn close(&self) {
        info!("closing database connections");
        self.pool.close().await;
        info!("database connections closed");
    }
}

fn pool_options(cfg: &DbConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .min_connections(cfg.min_connections)
        .max_connections(cfg.max_connections)
        .acquire_timeout(cfg.acquire_timeout)
}

fn connect_options(cfg: &DbConfig) -> anyhow::Result<PgConnectOptions> {
    let statement_timeout = cfg.command_timeout.as_millis().to_string();
    let options = PgConnectOptions::from_str(&cfg.url)
        .context("parse DATABASE_URL")?
        .options([("statement_timeout", statement_timeout.as_str())]);
    Ok(options)
}
