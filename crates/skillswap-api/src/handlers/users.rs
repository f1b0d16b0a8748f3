//! User handlers

use axum::{
    extract::{Path, State},
    Json,
};
use skillswap_service::{
    ConnectionsResponse, CreditsResponse, CurrentUserResponse, LedgerService,
    PurchaseCreditsRequest, UpdateUserRequest, UserResponse, UserService,
};

use super::parse_id;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Get current user
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.me(auth.user_id).await?))
}

/// Update current user (name, avatar, skills, availability)
///
/// PATCH /users/@me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.update(auth.user_id, request).await?))
}

/// Delete the current account (appointments cascade)
///
/// DELETE /users/@me
pub async fn delete_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<NoContent> {
    let service = UserService::new(state.service_context());
    service.delete(auth.user_id).await?;
    Ok(NoContent)
}

/// Convert monetary balance to credits
///
/// POST /users/@me/credits/purchase
pub async fn purchase_credits(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<PurchaseCreditsRequest>,
) -> ApiResult<Json<CreditsResponse>> {
    let service = LedgerService::new(state.service_context());
    Ok(Json(service.purchase(auth.user_id, request.amount).await?))
}

/// Connection graph of the current user
///
/// GET /users/@me/connections
pub async fn get_connections(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ConnectionsResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.connections(auth.user_id).await?))
}

/// Public profile of another user
///
/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = parse_id(&user_id, "user_id")?;
    let service = UserService::new(state.service_context());
    Ok(Json(service.get(user_id).await?))
}
