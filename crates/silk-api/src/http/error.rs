//! Application error type mapping to HTTP status codes.
//!
//! The response envelope is the flat `{"error": "..."}` shape the chat UI
//! consumes. Upstream failure details are logged server-side and never
//! forwarded verbatim to end users.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use silk_types::error::RepositoryError;
use silk_types::gateway::GatewayError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Upstream gateway errors, including missing configuration.
    Gateway(GatewayError),
    /// Persistence errors.
    Repository(RepositoryError),
    /// Authentication failure.
    Unauthorized(String),
    /// Validation error.
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<GatewayError> for AppError {
    fn from(e: GatewayError) -> Self {
        AppError::Gateway(e)
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Repository(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Gateway(GatewayError::RateLimited) => (
                StatusCode::TOO_MANY_REQUESTS,
                "Rate limit exceeded. Please try again later.".to_string(),
            ),
            AppError::Gateway(GatewayError::QuotaExceeded) => (
                StatusCode::PAYMENT_REQUIRED,
                "Payment required. Please add credits to continue.".to_string(),
            ),
            AppError::Gateway(GatewayError::MissingCredential) => {
                // Logged at error level where detected; the response stays
                // generic so configuration details never leak.
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AI gateway error".to_string(),
                )
            }
            AppError::Gateway(GatewayError::Upstream { .. })
            | AppError::Gateway(GatewayError::Transport(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AI gateway error".to_string(),
            ),
            AppError::Repository(e) => {
                tracing::error!(error = %e, "repository failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!(message = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        let body = json!({ "error": message });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(AppError::Gateway(GatewayError::RateLimited)),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            status_of(AppError::Gateway(GatewayError::QuotaExceeded)),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(
            status_of(AppError::Gateway(GatewayError::MissingCredential)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::Gateway(GatewayError::Upstream {
                status: 503,
                body: String::new()
            })),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::Unauthorized("no".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Validation("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
    }
}
