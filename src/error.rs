use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::error;
use utoipa::ToSchema;

use crate::store::StoreError;

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Envelope returned for every non-2xx response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub status_code: u16,
    /// RFC 3339, UTC.
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Raised on purpose by a handler; status and message reach the client as-is.
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// Anything nobody planned for. The client only sees a generic 500.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::Status {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    /// Translates a store failure. Query errors are anticipated and become a
    /// 500 carrying `message`; a closed pool falls through to the catch-all.
    pub fn from_store(err: StoreError, message: &str) -> Self {
        match err {
            StoreError::Query(e) => {
                error!(error = %e, "{message}");
                Self::internal(message)
            }
            other @ StoreError::NotInitialized => Self::Unexpected(other.into()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Status { status, .. } => *status,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| OffsetDateTime::now_utc().unix_timestamp().to_string())
}

fn envelope(status: StatusCode, message: String, details: Option<Vec<FieldError>>) -> Response {
    let body = ErrorBody {
        error: message,
        status_code: status.as_u16(),
        timestamp: now_rfc3339(),
        details,
    };
    (status, Json(body)).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::Status { message, .. } => envelope(status, message, None),
            Self::Validation(fields) => {
                envelope(status, "Validation failed".into(), Some(fields))
            }
            Self::Unexpected(e) => {
                error!(error = ?e, "unhandled exception");
                envelope(status, "Internal server error".into(), None)
            }
        }
    }
}

/// Panic hook for `CatchPanicLayer`: same envelope as any other unhandled fault.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    AppError::Unexpected(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(res: Response) -> ErrorBody {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("error envelope")
    }

    #[tokio::test]
    async fn explicit_status_is_preserved() {
        let res = AppError::not_found("User 42 not found").into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = body_of(res).await;
        assert_eq!(body.error, "User 42 not found");
        assert_eq!(body.status_code, 404);
        assert!(body.details.is_none());
        assert!(OffsetDateTime::parse(&body.timestamp, &Rfc3339).is_ok());
    }

    #[tokio::test]
    async fn unexpected_errors_hide_their_detail() {
        let err = AppError::from(anyhow::anyhow!("relation \"users\" does not exist"));
        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(res).await;
        assert_eq!(body.error, "Internal server error");
        assert_eq!(body.status_code, 500);
    }

    #[tokio::test]
    async fn validation_lists_every_field() {
        let err = AppError::Validation(vec![
            FieldError::new("limit", "value is not a valid integer"),
            FieldError::new("offset", "value is not a valid integer"),
        ]);
        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_of(res).await;
        let fields: Vec<_> = body
            .details
            .expect("details")
            .into_iter()
            .map(|f| f.field)
            .collect();
        assert_eq!(fields, ["limit", "offset"]);
    }

    #[tokio::test]
    async fn closed_pool_is_not_reported_as_query_failure() {
        let err = AppError::from_store(StoreError::NotInitialized, "Failed to fetch users");
        assert!(matches!(err, AppError::Unexpected(_)));
        let body = body_of(err.into_response()).await;
        assert_eq!(body.error, "Internal server error");
    }

    #[tokio::test]
    async fn panics_render_the_generic_envelope() {
        let res = panic_response(Box::new("boom"));
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(res).await.status_code, 500);
    }
}
