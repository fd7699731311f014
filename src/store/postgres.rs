use async_trait::async_trait;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::{
    db::Database, pagination::Pagination, projects::{self, repo_types::ProjectRow},
    users::{self, repo_types::UserRow},
};

#[derive(Clone)]
pub struct PgStore {
    db: Database,
}

impl PgStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.db.ping().await
    }

    async fn list_users(&self, page: Pagination) -> Result<Vec<UserRow>, StoreError> {
        Ok(users::repo::list(self.db.pool()?, page.limit, page.offset).await?)
    }

    async fn find_user(&self, id: &str) -> Result<Option<UserRow>, StoreError> {
        // A malformed id cannot match any row.
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };
        Ok(users::repo::find_by_id(self.db.pool()?, id).await?)
    }

    async fn list_projects(&self, page: Pagination) -> Result<Vec<ProjectRow>, StoreError> {
        Ok(projects::repo::list_active(self.db.pool()?, page.limit, page.offset).await?)
    }
}
