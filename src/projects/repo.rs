use sqlx::PgPool;

use super::repo_types::ProjectRow;

pub async fn list_active(
    db: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<ProjectRow>, sqlx::Error> {
    sqlx::query_as::<_, ProjectRow>(
        r#"
        SELECT id::text AS id, name, description, status, created_at
        FROM projects
        WHERE deleted_at IS NULL AND status = 'active'
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
}
