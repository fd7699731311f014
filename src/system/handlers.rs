use axum::{extract::State, Json};
use time::OffsetDateTime;
use tracing::{error, instrument};

use super::dto::{DatabaseStatus, HealthResponse, HelloResponse, RootResponse};
use crate::{
    error::{AppError, ErrorBody},
    state::AppState,
    store::StoreError,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses((status = 200, description = "Welcome message and documentation links", body = RootResponse))
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Welcome to the Professional Microservice API".into(),
        docs: "/docs".into(),
        redoc: "/redoc".into(),
        health: "/health".into(),
        version: VERSION.into(),
    })
}

#[utoipa::path(
    get,
    path = "/hello",
    tag = "hello",
    responses((status = 200, description = "Static greeting", body = HelloResponse))
)]
pub async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "Hello from CoreSkills4ai!".into(),
        timestamp: OffsetDateTime::now_utc(),
    })
}

/// A failing database is reported in the body; the request itself still succeeds.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Service and database status", body = HealthResponse),
        (status = 500, description = "Database pool unavailable", body = ErrorBody),
    )
)]
#[instrument(skip(state))]
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let database = match state.store.ping().await {
        Ok(()) => DatabaseStatus::Connected,
        Err(StoreError::NotInitialized) => {
            return Err(AppError::Unexpected(StoreError::NotInitialized.into()))
        }
        Err(e) => {
            error!(error = %e, "database health check failed");
            DatabaseStatus::Disconnected
        }
    };

    Ok(Json(HealthResponse {
        status: "healthy".into(),
        environment: state.config.environment.clone(),
        version: VERSION.into(),
        timestamp: OffsetDateTime::now_utc(),
        database,
    }))
}
