//! Authentication handlers

use axum::{extract::State, Json};
use skillswap_service::{
    AuthResponse, AuthService, LoginRequest, RefreshTokenRequest, RegisterRequest,
    VerifyEmailRequest,
};

use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a new account
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<AuthResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Log in with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Exchange a refresh token for a fresh pair
///
/// POST /auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh(&request.refresh_token).await?;
    Ok(Json(response))
}

/// Confirm the emailed verification code
///
/// POST /auth/verify-email
pub async fn verify_email(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<VerifyEmailRequest>,
) -> ApiResult<NoContent> {
    let service = AuthService::new(state.service_context());
    service.verify_email(request).await?;
    Ok(NoContent)
}
