//! Error handling for the Smart Agro Assistant server
//!
//! Maps pipeline failures onto HTTP status codes with a stable JSON envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::PipelineError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorDetail {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            field: None,
        }
    }
}

impl AppError {
    fn status_and_detail(&self) -> (StatusCode, ErrorDetail) {
        match self {
            AppError::Pipeline(PipelineError::Validation { field, message }) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::Pipeline(err @ PipelineError::ModelUnavailable { .. }) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail::new("MODEL_UNAVAILABLE", err.to_string()),
            ),
            AppError::Pipeline(err @ PipelineError::ModelInconsistency { .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("MODEL_INCONSISTENCY", err.to_string()),
            ),
            AppError::Pipeline(err @ PipelineError::FeatureShape { .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("FEATURE_SHAPE_MISMATCH", err.to_string()),
            ),
            AppError::MalformedBody(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("MALFORMED_BODY", msg.clone()),
            ),
            AppError::Dataset(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("DATASET_ERROR", format!("Dataset error: {}", msg)),
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail::new("NOT_FOUND", format!("{} not found", resource)),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("INTERNAL_ERROR", msg.clone()),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = self.status_and_detail();

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
