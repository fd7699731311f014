use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{instrument, warn};

use super::dto::UserResponse;
use crate::{
    error::{AppError, ErrorBody},
    pagination::Pagination,
    state::AppState,
};

/// GET /users?limit=&offset=
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(
        ("limit" = Option<i64>, Query, description = "Maximum number of users to return (default 10)"),
        ("offset" = Option<i64>, Query, description = "Number of users to skip (default 0)"),
    ),
    responses(
        (status = 200, description = "Users, newest first", body = [UserResponse]),
        (status = 422, description = "Invalid pagination parameters", body = ErrorBody),
        (status = 500, description = "Failed to fetch users", body = ErrorBody),
    )
)]
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    page: Pagination,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let rows = state
        .store
        .list_users(page)
        .await
        .map_err(|e| AppError::from_store(e, "Failed to fetch users"))?;
    Ok(Json(rows.into_iter().map(UserResponse::from).collect()))
}

/// GET /users/{id}
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 404, description = "Unknown or deleted user", body = ErrorBody),
        (status = 500, description = "Failed to fetch user", body = ErrorBody),
    )
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    match state.store.find_user(&id).await {
        Ok(Some(row)) => Ok(Json(row.into())),
        Ok(None) => {
            warn!(%id, "user not found");
            Err(AppError::not_found(format!("User {id} not found")))
        }
        Err(e) => Err(AppError::from_store(e, "Failed to fetch user")),
    }
}
