//! API error handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use sym_core::SymError;
use utoipa::ToSchema;

/// API error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Machine-readable error code
    #[schema(example = "invalid_input")]
    pub error: String,
    /// Human-readable message
    #[schema(example = "Text cannot be empty")]
    pub message: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new("invalid_input", message)
    }

    pub fn extraction_unavailable(message: impl Into<String>) -> Self {
        Self::new("extraction_unavailable", message)
    }

    pub fn internal_error() -> Self {
        Self::new("internal_error", "Internal server error")
    }
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    InvalidInput(String),
    ExtractionUnavailable(String),
    /// Details are logged, never returned to the client
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, ApiError::invalid_input(msg)),
            AppError::ExtractionUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiError::extraction_unavailable(msg),
            ),
            AppError::Internal(msg) => {
                tracing::error!(details = %msg, "Unhandled error");
                (StatusCode::INTERNAL_SERVER_ERROR, ApiError::internal_error())
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<SymError> for AppError {
    fn from(err: SymError) -> Self {
        match err {
            SymError::InvalidInput(msg) => AppError::InvalidInput(msg),
            SymError::ExtractionUnavailable(msg) => AppError::ExtractionUnavailable(msg),
            SymError::Config(msg) => AppError::Internal(format!("Configuration error: {msg}")),
            SymError::Other(err) => AppError::Internal(err.to_string()),
        }
    }
}
