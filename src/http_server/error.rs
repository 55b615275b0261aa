//! Defines the custom `ApiError` type for the HTTP server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::monitor::MonitorError;

/// A custom error type for the API that can be converted into an HTTP
/// response.
pub enum ApiError {
    /// Represents an unauthorized request.
    Unauthorized,

    /// Represents a resource that could not be found.
    NotFound(String),

    /// Represents an action on a resource owned by another account.
    Forbidden(String),

    /// Represents a free-tier quota exhaustion that requires payment.
    PaymentRequired {
        /// Active, unpaid monitors the owner currently holds.
        used: u32,
        /// The free-tier limit.
        limit: u32,
    },

    /// Represents a validation error for an unprocessable entity.
    UnprocessableEntity(String),

    /// Represents a generic internal server error.
    InternalServerError(String),
}

/// Converts a `MonitorError` into an `ApiError`.
///
/// This allows for the convenient use of the `?` operator in handlers on
/// functions that return `Result<_, MonitorError>`.
impl From<MonitorError> for ApiError {
    fn from(err: MonitorError) -> Self {
        match err {
            MonitorError::InvalidUrl | MonitorError::InvalidEmail =>
                ApiError::UnprocessableEntity(err.to_string()),
            MonitorError::QuotaExceeded { used, limit } => ApiError::PaymentRequired { used, limit },
            MonitorError::NotFound => ApiError::NotFound("Monitor not found".to_string()),
            MonitorError::NotOwner =>
                ApiError::Forbidden("Not authorized to manage this monitor".to_string()),
            MonitorError::Persistence(e) => ApiError::InternalServerError(e.to_string()),
        }
    }
}

/// Implements the conversion from `ApiError` into an `axum` response.
///
/// This is the central point for mapping internal application errors to
/// user-facing HTTP responses.
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ApiError::Unauthorized =>
                (StatusCode::UNAUTHORIZED, json!({ "error": "Unauthorized" })),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "error": message })),
            ApiError::Forbidden(message) => (StatusCode::FORBIDDEN, json!({ "error": message })),
            ApiError::PaymentRequired { used, limit } => (
                StatusCode::PAYMENT_REQUIRED,
                json!({
                    "error": "Free limit reached",
                    "requires_payment": true,
                    "free_used": used,
                    "free_limit": limit,
                }),
            ),
            ApiError::UnprocessableEntity(message) =>
                (StatusCode::UNPROCESSABLE_ENTITY, json!({ "error": message })),
            ApiError::InternalServerError(err) => {
                tracing::error!("Internal server error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An internal server error occurred" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
