use axum::{response::Html, routing::get, Json, Router};
use utoipa::OpenApi;

use crate::{error, projects, state::AppState, system, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Professional Microservice API",
        version = "0.1.0",
        description = "Health checks and read-only listings of users and projects"
    ),
    paths(
        system::handlers::root,
        system::handlers::hello,
        system::handlers::health,
        users::handlers::list_users,
        users::handlers::get_user,
        projects::handlers::list_projects,
    ),
    components(schemas(
        system::dto::RootResponse,
        system::dto::HelloResponse,
        system::dto::HealthResponse,
        system::dto::DatabaseStatus,
        users::dto::UserResponse,
        users::dto::NewUserRequest,
        projects::dto::ProjectResponse,
        error::ErrorBody,
        error::FieldError,
    )),
    tags(
        (name = "system", description = "Service metadata and health"),
        (name = "hello", description = "Greeting"),
        (name = "users", description = "User listings"),
        (name = "projects", description = "Project listings"),
    )
)]
pub struct ApiDoc;

pub const SPEC_URL: &str = "/openapi.json";

const SWAGGER_HTML: &str = r##"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Professional Microservice API - Swagger UI</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.ui = SwaggerUIBundle({ url: "/openapi.json", dom_id: "#swagger-ui" });
    </script>
</body>
</html>"##;

const REDOC_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Professional Microservice API - ReDoc</title>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>
        body {
            margin: 0;
            padding: 0;
        }
    </style>
</head>
<body>
    <redoc spec-url="/openapi.json"></redoc>
    <script src="https://cdn.jsdelivr.net/npm/redoc@2/bundles/redoc.standalone.js"></script>
</body>
</html>"#;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(SPEC_URL, get(|| async { Json(ApiDoc::openapi()) }))
        .route("/docs", get(|| async { Html(SWAGGER_HTML) }))
        .route("/redoc", get(|| async { Html(REDOC_HTML) }))
}
