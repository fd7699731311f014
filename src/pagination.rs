use async_trait::async_trait;
use axum::{extract::{FromRequestParts, Query}, http::request::Parts};
use serde::Deserialize;

use crate::error::{AppError, FieldError};

pub const DEFAULT_LIMIT: i64 = 10;

/// `?limit=&offset=` exactly as the client sent them.
#[derive(Debug, Default, Deserialize)]
pub struct RawPagination {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Validated paging window. Values go to the database untouched; there is no
/// upper bound on `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl RawPagination {
    pub fn validate(self) -> Result<Pagination, AppError> {
        let mut errors = Vec::new();
        let limit = parse_int("limit", self.limit, DEFAULT_LIMIT, &mut errors);
        let offset = parse_int("offset", self.offset, 0, &mut errors);
        if errors.is_empty() {
            Ok(Pagination { limit, offset })
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

fn parse_int(field: &str, raw: Option<String>, default: i64, errors: &mut Vec<FieldError>) -> i64 {
    match raw {
        None => default,
        Some(v) => v.parse::<i64>().unwrap_or_else(|_| {
            errors.push(FieldError::new(field, "value is not a valid integer"));
            default
        }),
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<RawPagination>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::Validation(vec![FieldError::new("query", e.body_text())]))?;
        raw.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(limit: Option<&str>, offset: Option<&str>) -> RawPagination {
        RawPagination {
            limit: limit.map(str::to_string),
            offset: offset.map(str::to_string),
        }
    }

    #[test]
    fn defaults_apply_when_absent() {
        assert_eq!(raw(None, None).validate().unwrap(), Pagination { limit: 10, offset: 0 });
    }

    #[test]
    fn values_pass_through_unbounded() {
        let p = raw(Some("100000"), Some("-3")).validate().unwrap();
        assert_eq!(p, Pagination { limit: 100_000, offset: -3 });
    }

    #[test]
    fn every_bad_field_is_reported() {
        let err = raw(Some("ten"), Some("")).validate().unwrap_err();
        match err {
            AppError::Validation(fields) => {
                let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(names, ["limit", "offset"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn extracts_from_query_string() {
        let req = axum::http::Request::builder()
            .uri("/users?limit=5&offset=10")
            .body(())
            .unwrap();
        let (mut parts, _) = req.into_parts();
        let p = Pagination::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(p, Pagination { limit: 5, offset: 10 });
    }
}
