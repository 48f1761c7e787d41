//! Error handling module
//!
//! Defines error types and handling logic used in the project. Every
//! client-facing body is a JSON object with a single `error` string,
//! except structured upstream errors, which are relayed untouched.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::services::upstream::UpstreamError;
use crate::utils::logging::truncate_content;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Non-POST request on the completion endpoint
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The server was deployed without an upstream API key
    #[error("OpenAI API key is not configured")]
    MissingApiKey,

    /// Request validation failed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream replied with a structured error, relayed verbatim
    #[error("Upstream returned status {status}")]
    Upstream {
        /// Status code to relay
        status: StatusCode,
        /// JSON error body to relay
        body: Value,
    },

    /// Upstream call failed without a relayable body. The detail is
    /// logged server-side and never sent to the client.
    #[error("AI request failed")]
    UpstreamFailed {
        /// Server-side diagnostic, kept out of the response
        detail: String,
    },
}

/// Client-facing error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error message
    pub error: String,
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream { status, .. } => *status,
            AppError::UpstreamFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error kind string for logging
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::MethodNotAllowed => "method_not_allowed",
            AppError::MissingApiKey => "server_misconfiguration",
            AppError::InvalidRequest(_) => "invalid_request",
            AppError::Upstream { .. } => "upstream_error",
            AppError::UpstreamFailed { .. } => "upstream_failure",
        }
    }

    /// Whether detailed error information should be logged
    pub fn should_log_details(&self) -> bool {
        matches!(
            self,
            AppError::MissingApiKey | AppError::UpstreamFailed { .. }
        )
    }
}

impl From<UpstreamError> for AppError {
    fn from(error: UpstreamError) -> Self {
        match error {
            UpstreamError::MissingKey => AppError::MissingApiKey,
            // reqwest and axum sit on different http major versions, so
            // the status crosses the boundary as a bare u16.
            UpstreamError::Api { status, body } => AppError::Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                body,
            },
            UpstreamError::Opaque { status, detail } => AppError::UpstreamFailed {
                detail: format!(
                    "upstream returned non-JSON error (status {}): {}",
                    status,
                    truncate_content(&detail, 200)
                ),
            },
            UpstreamError::Transport(error) => AppError::UpstreamFailed {
                detail: format!("transport error: {}", error),
            },
        }
    }
}

/// Implement IntoResponse trait to allow errors to be returned directly as HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log error
        if self.should_log_details() {
            match &self {
                AppError::UpstreamFailed { detail } => {
                    tracing::error!("Upstream call failed: {} - Status code: {}", detail, status)
                }
                other => tracing::error!("Application error: {} - Status code: {}", other, status),
            }
        } else {
            tracing::warn!("Request failed: {} - Status code: {}", self.kind(), status);
        }

        // Structured upstream errors relay the upstream body and status untouched
        if let AppError::Upstream { status, body } = self {
            return (status, Json(body)).into_response();
        }

        let body = Json(ErrorBody {
            error: self.to_string(),
        });

        if matches!(self, AppError::MethodNotAllowed) {
            (status, [(header::ALLOW, "POST")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            AppError::MissingApiKey.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::InvalidRequest("test".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Upstream {
                status: StatusCode::TOO_MANY_REQUESTS,
                body: json!({"error": "rate limited"}),
            }
            .status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::UpstreamFailed {
                detail: "boom".to_string()
            }
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_messages_are_stable() {
        assert_eq!(AppError::MethodNotAllowed.to_string(), "Method not allowed");
        assert_eq!(
            AppError::MissingApiKey.to_string(),
            "OpenAI API key is not configured"
        );
        assert_eq!(
            AppError::InvalidRequest("messages must be an array".to_string()).to_string(),
            "Invalid request: messages must be an array"
        );
        assert_eq!(
            AppError::UpstreamFailed {
                detail: "connection refused".to_string()
            }
            .to_string(),
            "AI request failed"
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(AppError::MethodNotAllowed.kind(), "method_not_allowed");
        assert_eq!(AppError::MissingApiKey.kind(), "server_misconfiguration");
        assert_eq!(
            AppError::InvalidRequest("test".to_string()).kind(),
            "invalid_request"
        );
    }

    #[test]
    fn test_upstream_api_error_converts_to_relay() {
        let error = AppError::from(UpstreamError::Api {
            status: 429,
            body: json!({"error": "rate limited"}),
        });

        match error {
            AppError::Upstream { status, body } => {
                assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
                assert_eq!(body, json!({"error": "rate limited"}));
            }
            other => panic!("Expected relay error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_key_converts_without_detail() {
        let error = AppError::from(UpstreamError::MissingKey);
        assert!(matches!(error, AppError::MissingApiKey));
        // The message names the variable, never the value
        assert_eq!(error.to_string(), "OpenAI API key is not configured");
    }

    #[test]
    fn test_opaque_error_keeps_detail_out_of_message() {
        let error = AppError::from(UpstreamError::Opaque {
            status: 502,
            detail: "<html>Bad Gateway</html>".to_string(),
        });

        assert_eq!(error.to_string(), "AI request failed");
        match error {
            AppError::UpstreamFailed { detail } => {
                assert!(detail.contains("502"));
                assert!(detail.contains("Bad Gateway"));
            }
            other => panic!("Expected opaque failure, got {:?}", other),
        }
    }
}
