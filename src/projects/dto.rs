use serde::Serialize;
use time::OffsetDateTime;
use utoipa::ToSchema;

use super::repo_types::ProjectRow;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<ProjectRow> for ProjectResponse {
    fn from(r: ProjectRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            description: r.description,
            status: r.status,
            created_at: r.created_at,
        }
    }
}
