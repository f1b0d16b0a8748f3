//! Authentication extractor
//!
//! Pulls the Bearer token from the Authorization header and resolves it
//! to a user ID; every core operation runs in that session context.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use skillswap_core::Snowflake;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Snowflake,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let bearer = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::MissingAuth)?;

        let user_id = AppState::from_ref(state)
            .jwt_service()
            .validate_access_token(bearer.token())
            .and_then(|claims| claims.user_id())
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected access token");
                ApiError::InvalidAuthFormat
            })?;

        Ok(AuthUser { user_id })
    }
}
