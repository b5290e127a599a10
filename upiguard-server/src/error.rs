//! Error handling for the upiguard server

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use upiguard::validator::ValidationError;

/// API error response
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Server error types
#[derive(Debug, Error)]
pub enum ServerError {
    /// Bad request error (missing or non-string payload field)
    #[error("{0}")]
    BadRequest(String),

    /// Internal server error
    #[error("Internal server error occurred while processing the request.")]
    Internal(String),
}

impl From<upiguard::UpiguardError> for ServerError {
    fn from(err: upiguard::UpiguardError) -> Self {
        match err {
            // Empty input is the caller's fault; everything else that leaks
            // out of the pipeline is a server fault. Format rejections never
            // reach this type, they are 200 verdicts.
            upiguard::UpiguardError::Validation(ValidationError::EmptyInput) => {
                ServerError::BadRequest(
                    "Invalid input. Please provide a valid upiId string.".to_string(),
                )
            }
            other => ServerError::Internal(other.to_string()),
        }
    }
}

impl ServerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        if let ServerError::Internal(detail) = &self {
            tracing::error!(detail = %detail, "internal server error");
        }

        let status = self.status_code();
        let error_response = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

/// Helper function to create a bad request error
pub fn bad_request(message: &str) -> ServerError {
    ServerError::BadRequest(message.to_string())
}
