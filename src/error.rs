//! Request-level error types.
//!
//! Every failed request maps to exactly one [`AppError`] kind, and every
//! kind maps to exactly one HTTP status code. Errors are rendered as
//! `{"error": "<message>", "StatusCode": <code>}`.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{debug, error};

use crate::constants::CONTENT_TYPE_JSON;
use crate::services::records::PipelineError;

/// Result type for request handlers.
pub type Result<T> = std::result::Result<T, AppError>;

/// Request failures surfaced to HTTP clients.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// The path exists but does not accept this method.
    #[error("this method is not allowed in current url")]
    MethodNotAllowed,

    /// A body-carrying request without `content-type: application/json`.
    #[error("unsupported content-type, only application/json is allowed")]
    UnsupportedContentType,

    /// Malformed JSON or a body that fails domain validation.
    #[error("request body is invalid: {0}")]
    InvalidBody(String),

    /// Lookup of a key that does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The record backend failed.
    #[error("error in records aggregate: {0}")]
    DataAccess(String),

    /// Serialization failure or other unexpected fault.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::UnsupportedContentType | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::DataAccess(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Create an invalid body error.
    pub fn invalid_body(reason: impl std::fmt::Display) -> Self {
        Self::InvalidBody(reason.to_string())
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        Self::InvalidBody(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::DataAccess(format!("{err:#}"))
    }
}

/// Wire shape of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(rename = "StatusCode")]
    pub status_code: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = ErrorBody {
            error: self.to_string(),
            status_code: status.as_u16(),
        };
        // ErrorBody holds two plain fields, so encoding cannot fail.
        let bytes = serde_json::to_vec(&body).unwrap_or_default();

        (status, [(header::CONTENT_TYPE, CONTENT_TYPE_JSON)], bytes).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::MethodNotAllowed.status_code(), 405);
        assert_eq!(AppError::UnsupportedContentType.status_code(), 400);
        assert_eq!(AppError::invalid_body("bad").status_code(), 400);
        assert_eq!(AppError::NotFound("k".into()).status_code(), 404);
        assert_eq!(AppError::DataAccess("db".into()).status_code(), 500);
        assert_eq!(AppError::Internal("enc".into()).status_code(), 500);
    }

    #[test]
    fn test_pipeline_errors_become_invalid_body() {
        let err = AppError::from(PipelineError::InvalidRange("inverted".into()));
        assert!(matches!(err, AppError::InvalidBody(_)));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_backend_errors_become_data_access() {
        let err = AppError::from(anyhow::anyhow!("connection refused"));
        assert!(matches!(err, AppError::DataAccess(_)));
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_into_response_shape() {
        let response = AppError::NotFound("key 'missing'".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "not found: key 'missing'");
        assert_eq!(body["StatusCode"], 404);
    }
}
