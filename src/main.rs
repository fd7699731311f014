mod app;
mod config;
mod db;
mod docs;
mod error;
mod middleware;
mod pagination;
mod projects;
mod state;
mod store;
mod system;
mod users;

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        let level = config.log_directive();
        format!("projectdesk={level},tower_http={level},sqlx=warn")
    });
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    tracing::info!(environment = %config.environment, "starting application");

    let (app_state, db) = AppState::init(config.clone()).await.map_err(|e| {
        tracing::error!(error = %e, "failed to initialize database");
        e
    })?;

    let served = app::serve(app::build_app(app_state), &config).await;

    tracing::info!("shutting down application");
    db.close().await;
    served
}
