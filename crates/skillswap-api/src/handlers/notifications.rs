//! Notification handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;
use skillswap_service::{
    MarkNotificationsReadRequest, NotificationResponse, NotificationService, SeenOutcome,
    UnreadCountResponse,
};

use super::parse_id;
use crate::extractors::AuthUser;
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// All notifications of the current user, newest first
///
/// GET /notifications
pub async fn get_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    let service = NotificationService::new(state.service_context());
    Ok(Json(service.list(auth.user_id).await?))
}

/// Unread count for the badge
///
/// GET /notifications/unread-count
pub async fn get_unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UnreadCountResponse>> {
    let service = NotificationService::new(state.service_context());
    Ok(Json(service.unread_count(auth.user_id).await?))
}

/// Mark a batch as read
///
/// PATCH /notifications/read
pub async fn mark_notifications_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<MarkNotificationsReadRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let service = NotificationService::new(state.service_context());
    let updated = service.mark_read(auth.user_id, &request.ids).await?;
    Ok(Json(json!({ "updated": updated })))
}

/// First sighting marks seen; a second sighting deletes
///
/// PATCH /notifications/{notification_id}/seen
pub async fn mark_seen_or_delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(notification_id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let notification_id = parse_id(&notification_id, "notification_id")?;
    let service = NotificationService::new(state.service_context());
    let outcome = service.mark_seen_or_delete(notification_id, auth.user_id).await?;
    Ok(Json(json!({
        "deleted": outcome == SeenOutcome::Deleted,
    })))
}

/// Delete one of the user's own notifications
///
/// DELETE /notifications/{notification_id}
pub async fn delete_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(notification_id): Path<String>,
) -> ApiResult<NoContent> {
    let notification_id = parse_id(&notification_id, "notification_id")?;
    let service = NotificationService::new(state.service_context());
    service.delete(notification_id, auth.user_id).await?;
    Ok(NoContent)
}
