use sqlx::FromRow;
use time::OffsetDateTime;

/// Columns selected for a user. The stored password hash is never read.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
}
