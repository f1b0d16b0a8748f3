//! Chat history handlers
//!
//! Live messaging happens over the socket; these endpoints serve history
//! and the conversation sidebar.

use axum::{
    extract::{Path, State},
    Json,
};
use skillswap_service::{ChatService, ConversationResponse, MessageResponse};

use crate::extractors::AuthUser;
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Conversation list with unread counts, latest first
///
/// GET /messages/conversations
pub async fn get_conversations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ConversationResponse>>> {
    let service = ChatService::new(state.service_context());
    Ok(Json(service.conversations(auth.user_id).await?))
}

/// Room history, oldest first (room members only)
///
/// GET /messages/{room_id}
pub async fn get_room_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(room_id): Path<String>,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let service = ChatService::new(state.service_context());
    Ok(Json(service.room_history(&room_id, auth.user_id).await?))
}

/// Mark a room's incoming messages as read
///
/// PATCH /messages/{room_id}/read
pub async fn mark_room_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(room_id): Path<String>,
) -> ApiResult<NoContent> {
    let service = ChatService::new(state.service_context());
    service.mark_room_read(&room_id, auth.user_id).await?;
    Ok(NoContent)
}
