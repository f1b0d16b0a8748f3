//! Response types and error handling for API endpoints
//!
//! Every failure funnels into `ApiError`, which renders the shared
//! `{"error": {code, message}}` body. Domain violations surface verbatim
//! with their status codes; unclassified failures are logged and
//! collapsed to a generic 500 so internals never leak.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use skillswap_common::AppError;
use skillswap_core::DomainError;
use skillswap_service::ServiceError;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Invalid authorization header format")]
    InvalidAuthFormat,

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    /// HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        let raw = match self {
            Self::App(e) => e.status_code(),
            Self::Service(e) => e.status_code(),
            Self::Domain(e) if e.is_not_found() => 404,
            Self::Domain(e) if e.is_authorization() => 403,
            Self::Domain(e) if e.is_conflict() => 409,
            Self::Domain(e) if e.is_client_violation() => 400,
            Self::Domain(_) => 500,
            Self::Validation(_) | Self::InvalidPath(_) | Self::InvalidQuery(_) => 400,
            Self::MissingAuth | Self::InvalidAuthFormat => 401,
            Self::Internal(_) => 500,
        };
        StatusCode::from_u16(raw).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Stable error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidPath(_) => "INVALID_PATH_PARAMETER",
            Self::InvalidQuery(_) => "INVALID_QUERY_PARAMETER",
            Self::MissingAuth => "MISSING_AUTHORIZATION",
            Self::InvalidAuthFormat => "INVALID_AUTHORIZATION_FORMAT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Wrap any error as an internal failure
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    /// A malformed path parameter
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    /// A malformed query parameter or body
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }
}

/// Error body shape
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code().to_string();

        // Server errors are logged in full and reported generically
        let message = if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        // Field-level details only exist for validation failures
        let details = match &self {
            Self::Validation(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message, details },
        };
        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Created response (201) wrapping another response
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        *response.status_mut() = StatusCode::CREATED;
        response
    }
}

/// No content response (204)
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(ApiError::MissingAuth.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::InvalidPath("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Domain(DomainError::InsufficientCredit).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Domain(DomainError::EmailAlreadyExists).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Domain(DomainError::NotAuthorized("x")).status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn domain_codes_pass_through() {
        assert_eq!(
            ApiError::Domain(DomainError::InsufficientCredit).error_code(),
            "INSUFFICIENT_CREDIT"
        );
        assert_eq!(ApiError::MissingAuth.error_code(), "MISSING_AUTHORIZATION");
    }
}
