//! Application error types
//!
//! The one error type every layer above the domain can fall back to.
//! Domain violations keep their own codes; everything else maps onto a
//! small auth/validation/infrastructure taxonomy.

use serde::Serialize;
use skillswap_core::DomainError;
use std::fmt;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Missing authentication")]
    MissingAuth,

    #[error("Account is banned")]
    Banned,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AppError {
    /// HTTP status code for this error. Domain violations are 400-class
    /// client errors; only unclassified failures become 500s.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::InvalidCredentials | Self::InvalidToken | Self::TokenExpired | Self::MissingAuth => 401,
            Self::Banned => 403,
            Self::NotFound(_) => 404,
            Self::Database(_) | Self::Config(_) | Self::Internal(_) => 500,
            Self::Domain(e) if e.is_not_found() => 404,
            Self::Domain(e) if e.is_authorization() => 403,
            Self::Domain(e) if e.is_conflict() => 409,
            Self::Domain(e) if e.is_client_violation() => 400,
            Self::Domain(_) => 500,
        }
    }

    /// Stable error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::MissingAuth => "MISSING_AUTH",
            Self::Banned => "BANNED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Wrap any error as an internal failure
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    /// Not-found for a named resource
    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::NotFound(resource.to_string())
    }
}

/// Error body shape shared by every endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.error_code().to_string(),
            message: err.to_string(),
            details: None,
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_are_401() {
        for err in [AppError::InvalidCredentials, AppError::InvalidToken, AppError::TokenExpired] {
            assert_eq!(err.status_code(), 401);
        }
    }

    #[test]
    fn banned_is_403_and_infra_is_500() {
        assert_eq!(AppError::Banned.status_code(), 403);
        assert_eq!(AppError::Database("boom".into()).status_code(), 500);
        assert!(AppError::Database("boom".into()).is_server_error());
        assert!(AppError::Banned.is_client_error());
    }

    #[test]
    fn booking_domain_errors_map_to_400() {
        assert_eq!(AppError::Domain(DomainError::InsufficientCredit).status_code(), 400);
        assert_eq!(AppError::Domain(DomainError::InsufficientFunds).status_code(), 400);
        assert_eq!(
            AppError::Domain(DomainError::InvalidWeek { week: 3, max: 2 }).status_code(),
            400
        );
    }

    #[test]
    fn domain_not_found_keeps_its_code() {
        let err = AppError::Domain(DomainError::UserNotFound(skillswap_core::Snowflake::new(1)));
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "UNKNOWN_USER");
    }

    #[test]
    fn error_response_carries_code_and_message() {
        let body = ErrorResponse::from(AppError::not_found("user"));
        assert_eq!(body.code, "NOT_FOUND");
        assert_eq!(body.message, "Resource not found: user");
        assert!(body.details.is_none());
    }
}
