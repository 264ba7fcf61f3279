//! Error handling for the application

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::booking::calculators::QuoteError;
use crate::booking::flow::FlowError;
use crate::booking::selection::SelectionError;
use crate::booking::validation::{FailureDetail, ValidationFailure};

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found")]
    NotFound,

    #[error("Invalid request body: {}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),

    #[error("Booking is not valid: {} problem(s)", .0.len())]
    Validation(Vec<ValidationFailure>),

    #[error("Invalid quote: {0}")]
    InvalidQuote(#[from] QuoteError),

    #[error("Invalid location selection: {0}")]
    Selection(#[from] SelectionError),

    #[error("Booking flow error: {0}")]
    Flow(FlowError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body returned for every error
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<FlowError> for AppError {
    fn from(err: FlowError) -> Self {
        match err {
            FlowError::Rejected(failures) => AppError::Validation(failures),
            FlowError::Selection(e) => AppError::Selection(e),
            other => AppError::Flow(other),
        }
    }
}

impl AppError {
    fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            AppError::InvalidBody(rejection) => (rejection.status(), "invalid_body"),
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation"),
            AppError::InvalidQuote(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_quote"),
            AppError::Selection(_) => (StatusCode::CONFLICT, "selection"),
            AppError::Flow(FlowError::Busy) => (StatusCode::CONFLICT, "busy"),
            AppError::Flow(_) => (StatusCode::CONFLICT, "flow"),
            AppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage"),
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();

        let (message, details) = match &self {
            AppError::Validation(failures) => (
                "Please correct the highlighted booking fields".to_string(),
                serde_json::to_value(failures.iter().map(FailureDetail::from).collect::<Vec<_>>()).ok(),
            ),
            AppError::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                ("Failed to complete booking".to_string(), None)
            }
            AppError::Config(e) => {
                tracing::error!("Configuration error: {}", e);
                ("Internal error".to_string(), None)
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                ("Internal error".to_string(), None)
            }
            other => (other.to_string(), None),
        };

        let body = ErrorResponse {
            error_type: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
