use async_trait::async_trait;
use thiserror::Error;

use crate::{pagination::Pagination, projects::repo_types::ProjectRow, users::repo_types::UserRow};

#[cfg(test)]
pub mod memory;
mod postgres;

pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database pool not initialized")]
    NotInitialized,
    #[error(transparent)]
    Query(#[from] sqlx::Error),
}

/// Read access to users and projects. Every method issues exactly one query.
#[async_trait]
pub trait Store: Send + Sync {
    /// Trivial liveness query.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Non-deleted users, newest first.
    async fn list_users(&self, page: Pagination) -> Result<Vec<UserRow>, StoreError>;

    /// `None` when the id is not a UUID, is unknown or belongs to a soft-deleted user.
    async fn find_user(&self, id: &str) -> Result<Option<UserRow>, StoreError>;

    /// Non-deleted projects with status `active`, newest first.
    async fn list_projects(&self, page: Pagination) -> Result<Vec<ProjectRow>, StoreError>;
}
