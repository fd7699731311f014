use axum::{extract::State, Json};
use tracing::instrument;

use super::dto::ProjectResponse;
use crate::{
    error::{AppError, ErrorBody},
    pagination::Pagination,
    state::AppState,
};

/// GET /projects?limit=&offset=
#[utoipa::path(
    get,
    path = "/projects",
    tag = "projects",
    params(
        ("limit" = Option<i64>, Query, description = "Maximum number of projects to return (default 10)"),
        ("offset" = Option<i64>, Query, description = "Number of projects to skip (default 0)"),
    ),
    responses(
        (status = 200, description = "Active projects, newest first", body = [ProjectResponse]),
        (status = 422, description = "Invalid pagination parameters", body = ErrorBody),
        (status = 500, description = "Failed to fetch projects", body = ErrorBody),
    )
)]
#[instrument(skip(state))]
pub async fn list_projects(
    State(state): State<AppState>,
    page: Pagination,
) -> Result<Json<Vec<ProjectResponse>>, AppError> {
    let rows = state
        .store
        .list_projects(page)
        .await
        .map_err(|e| AppError::from_store(e, "Failed to fetch projects"))?;
    Ok(Json(rows.into_iter().map(ProjectResponse::from).collect()))
}
