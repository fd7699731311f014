use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

use super::repo_types::UserRow;
use crate::error::{AppError, FieldError};

/// Public view of a user. Has no credential fields, so none can leak.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<UserRow> for UserResponse {
    fn from(r: UserRow) -> Self {
        Self {
            id: r.id,
            username: r.username,
            email: r.email,
            full_name: r.full_name,
            is_active: r.is_active,
            created_at: r.created_at,
        }
    }
}

/// Shape of a new user as accepted by the user store.
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({
    "username": "johndoe",
    "email": "john@example.com",
    "password": "securepassword123",
    "full_name": "John Doe"
}))]
pub struct NewUserRequest {
    /// 3 to 50 characters, unique.
    pub username: String,
    pub email: String,
    /// At least 8 characters.
    pub password: String,
    /// At most 100 characters.
    pub full_name: Option<String>,
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

impl NewUserRequest {
    /// Checks every field and reports all violations at once.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();

        let username_len = self.username.chars().count();
        if !(3..=50).contains(&username_len) {
            errors.push(FieldError::new(
                "username",
                "must be between 3 and 50 characters",
            ));
        }
        if !is_valid_email(&self.email) {
            errors.push(FieldError::new("email", "value is not a valid email address"));
        }
        if self.password.chars().count() < 8 {
            errors.push(FieldError::new("password", "must be at least 8 characters"));
        }
        if let Some(name) = &self.full_name {
            if name.chars().count() > 100 {
                errors.push(FieldError::new("full_name", "must be at most 100 characters"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}
