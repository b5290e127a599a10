//! API implementation for the upiguard HTTP server

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

pub mod check;
pub mod dto;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(check::check, check::health),
    components(
        schemas(
            dto::CheckRequest,
            dto::CheckResponse,
            dto::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "classification", description = "UPI handle safety classification"),
        (name = "health", description = "Service health reporting"),
    ),
    info(
        title = "Upiguard API",
        version = "1.0.0",
        description = "Classifies UPI payment handles as SAFE or SUSPICIOUS, \
                       using an OpenAI-backed classifier with a deterministic \
                       heuristic fallback.",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;

/// Create the main router with all API endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route("/check", post(check::check))
        .route("/health", get(check::health))
        .with_state(state);

    let swagger_router = SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    api_router.merge(swagger_router)
}
