use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Errors surfaced to HTTP clients as `{ok:false, error:<code>}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("invalid json body: {0}")]
    InvalidJson(String),
    #[error("request body too large")]
    PayloadTooLarge,
    #[error("route not found")]
    NotFound,
    /// Unexpected failure while handling operation `op`.
    #[error("{op} failed: {cause}")]
    Internal { op: &'static str, cause: String },
}

impl ApiError {
    pub fn internal(op: &'static str, cause: impl Into<String>) -> Self {
        Self::Internal { op, cause: cause.into() }
    }

    /// Map a service error raised while running `op`.
    pub fn from_service(op: &'static str, err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidArgument(code) => Self::InvalidArgument(code),
            other => Self::internal(op, other.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidArgument(_) | ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for the response body.
    pub fn code(&self) -> String {
        match self {
            ApiError::InvalidArgument(code) => (*code).to_string(),
            ApiError::InvalidJson(_) => "invalid_json".to_string(),
            ApiError::PayloadTooLarge => "payload_too_large".to_string(),
            ApiError::NotFound => "not_found".to_string(),
            ApiError::Internal { op, .. } => format!("{op}_failed"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        match &self {
            ApiError::Internal { op, cause } => error!(op, error = %cause, "request failed"),
            ApiError::InvalidJson(detail) => warn!(error = %detail, "rejected request body"),
            _ => {}
        }
        (status, Json(serde_json::json!({"ok": false, "error": code}))).into_response()
    }
}
