pub mod dto;
pub mod handlers;

use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root))
        .route("/hello", get(handlers::hello))
        .route("/health", get(handlers::health))
}
