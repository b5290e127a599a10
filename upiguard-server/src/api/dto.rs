//! Data Transfer Objects for the API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use upiguard::models::Verdict;

/// Request body for `POST /check`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckRequest {
    /// The UPI handle to classify
    #[serde(rename = "upiId")]
    pub upi_id: String,
}

/// Classification response for `POST /check`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckResponse {
    /// Whether the handle was judged safe
    pub safe: bool,

    /// Advisory explanation text
    pub message: String,
}

impl From<Verdict> for CheckResponse {
    fn from(verdict: Verdict) -> Self {
        Self {
            safe: verdict.safe(),
            message: verdict.message().to_string(),
        }
    }
}

/// Response for `GET /health`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always "healthy" when the server answers
    pub status: String,

    /// Active classification path: "OpenAI API" or "Mock Classification"
    #[serde(rename = "aiMode")]
    pub ai_mode: String,

    /// Server time, ISO-8601
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use upiguard::models::VerdictSource;

    #[test]
    fn check_request_uses_camel_case_field() {
        let request: CheckRequest = serde_json::from_str(r#"{"upiId": "a@bcd"}"#).unwrap();
        assert_eq!(request.upi_id, "a@bcd");

        // Missing field must fail deserialization, the handler maps it to 400
        assert!(serde_json::from_str::<CheckRequest>("{}").is_err());
        assert!(serde_json::from_str::<CheckRequest>(r#"{"upiId": 42}"#).is_err());
    }

    #[test]
    fn check_response_mirrors_verdict() {
        let verdict = Verdict::new(false, "bad handle", VerdictSource::Heuristic);
        let response = CheckResponse::from(verdict);
        assert!(!response.safe);
        assert_eq!(response.message, "bad handle");
    }

    #[test]
    fn health_response_serializes_iso8601_timestamp() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            ai_mode: "Mock Classification".to_string(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["timestamp"].as_str().unwrap().contains('T'));
        assert_eq!(json["aiMode"], "Mock Classification");
    }
}
