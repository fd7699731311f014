//! In-memory [`Store`] mirroring the SQL in `users::repo` and `projects::repo`.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use time::OffsetDateTime;

use super::{Store, StoreError};
use crate::{pagination::Pagination, projects::repo_types::ProjectRow, users::repo_types::UserRow};

#[derive(Debug, Clone)]
pub struct StoredUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub deleted: bool,
}

impl StoredUser {
    pub fn new(username: &str, created_at: OffsetDateTime) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.into(),
            email: format!("{username}@example.com"),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
            full_name: None,
            is_active: true,
            created_at,
            deleted: false,
        }
    }

    fn row(&self) -> UserRow {
        UserRow {
            id: self.id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoredProject {
    pub row: ProjectRow,
    pub deleted: bool,
}

impl StoredProject {
    pub fn new(name: &str, status: &str, created_at: OffsetDateTime) -> Self {
        Self {
            row: ProjectRow {
                id: uuid::Uuid::new_v4().to_string(),
                name: name.into(),
                description: None,
                status: status.into(),
                created_at,
            },
            deleted: false,
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub users: Vec<StoredUser>,
    pub projects: Vec<StoredProject>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new(users: Vec<StoredUser>, projects: Vec<StoredProject>) -> Self {
        Self {
            users,
            projects,
            failing: AtomicBool::new(false),
        }
    }

    /// Every later call fails the way an unreachable database would.
    pub fn failing() -> Self {
        let store = Self::default();
        store.failing.store(true, Ordering::SeqCst);
        store
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Query(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

fn window<T>(mut rows: Vec<T>, page: Pagination, created_at: impl Fn(&T) -> OffsetDateTime) -> Vec<T> {
    rows.sort_by_key(|r| std::cmp::Reverse(created_at(r)));
    rows.into_iter()
        .skip(page.offset.max(0) as usize)
        .take(page.limit.max(0) as usize)
        .collect()
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }

    async fn list_users(&self, page: Pagination) -> Result<Vec<UserRow>, StoreError> {
        self.check()?;
        let live: Vec<UserRow> = self.users.iter().filter(|u| !u.deleted).map(StoredUser::row).collect();
        Ok(window(live, page, |u| u.created_at))
    }

    async fn find_user(&self, id: &str) -> Result<Option<UserRow>, StoreError> {
        if uuid::Uuid::parse_str(id).is_err() {
            return Ok(None);
        }
        self.check()?;
        Ok(self
            .users
            .iter()
            .find(|u| u.id == id && !u.deleted)
            .map(StoredUser::row))
    }

    async fn list_projects(&self, page: Pagination) -> Result<Vec<ProjectRow>, StoreError> {
        self.check()?;
        let active: Vec<ProjectRow> = self
            .projects
            .iter()
            .filter(|p| !p.deleted && p.row.status == "active")
            .map(|p| p.row.clone())
            .collect();
        Ok(window(active, page, |p| p.created_at))
    }
}
