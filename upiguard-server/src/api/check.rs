//! Classification API endpoints

use std::sync::Arc;

use axum::{
    Json as JsonExtractor,
    extract::{State, rejection::JsonRejection},
    response::Json,
};
use chrono::Utc;

use crate::{
    api::dto::{CheckRequest, CheckResponse, HealthResponse},
    error::{ServerResult, bad_request},
    state::AppState,
};

/// Classify a UPI handle
#[utoipa::path(
    post,
    path = "/check",
    tag = "classification",
    request_body = CheckRequest,
    responses(
        (status = 200, description = "Classification verdict (including format rejections)", body = CheckResponse),
        (status = 400, description = "Missing or non-string upiId", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    )
)]
pub async fn check(
    State(state): State<Arc<AppState>>,
    request: Result<JsonExtractor<CheckRequest>, JsonRejection>,
) -> ServerResult<Json<CheckResponse>> {
    // A missing field or wrong type is the caller's error (400); a malformed
    // handle is a classification result (200 with safe=false).
    let JsonExtractor(request) = request
        .map_err(|_| bad_request("Invalid input. Please provide a valid upiId string."))?;

    let verdict = state.service.check(&request.upi_id).await?;
    Ok(Json(verdict.into()))
}

/// Health check with the active classification mode
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health and active AI mode", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        ai_mode: state.service.mode().to_string(),
        timestamp: Utc::now(),
    })
}
