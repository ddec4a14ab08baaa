//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::services::ServiceError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request shape (before it reaches the service layer)
    BadRequest(String),
    /// Internal server error
    Internal(String),
    /// Business error from the service layer
    Service(ServiceError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Service(err) => {
                let (status, code) = match &err {
                    ServiceError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION"),
                    ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                    ServiceError::SlotUnavailable(_) => (StatusCode::CONFLICT, "SLOT_UNAVAILABLE"),
                    ServiceError::SlotFull(_) => (StatusCode::CONFLICT, "SLOT_FULL"),
                    ServiceError::DuplicateBooking(_) => {
                        (StatusCode::CONFLICT, "DUPLICATE_BOOKING")
                    }
                    ServiceError::ConcurrencyConflict(_) => {
                        (StatusCode::CONFLICT, "CONCURRENCY_CONFLICT")
                    }
                    ServiceError::StoreUnavailable(_) => {
                        (StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE")
                    }
                };
                (status, ApiError::new(code, err.to_string()))
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        AppError::Service(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
