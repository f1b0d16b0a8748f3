//! Registration, room membership, and message routing

use skillswap_core::{room_id, Snowflake};
use skillswap_service::{ChatService, ServiceResult};

use crate::events::{MessagePayload, NotificationPayload, ServerEvent};
use crate::presence::ConnectionHandle;
use crate::server::HubState;

/// Bind the connection to a user identity (idempotent upsert)
pub fn register_user(state: &HubState, session_id: &str, user_id: Snowflake) {
    let Some(sender) = state.session_sender(session_id) else {
        tracing::warn!(session_id, "register_user for unknown session");
        return;
    };
    state.hub().register(
        user_id,
        ConnectionHandle {
            session_id: session_id.to_string(),
            sender,
        },
    );
}

/// Subscribe the user to the room shared with the other user
pub fn join_chat(state: &HubState, user_id: Snowflake, other_user_id: Snowflake) {
    let room = room_id(user_id, other_user_id);
    state.hub().join_room(&room, user_id);
}

/// Persist the message and its notification, then broadcast to the room
/// and push directly to the receiver (who may be online but looking at a
/// different room).
pub async fn send_message(
    state: &HubState,
    sender_id: Snowflake,
    receiver_id: Snowflake,
    text: String,
) -> ServiceResult<()> {
    // Mirror the transport behavior of the room join on send: the sender
    // lands in the room even without an explicit join_chat.
    let room = room_id(sender_id, receiver_id);
    state.hub().join_room(&room, sender_id);

    let service = ChatService::new(state.service_context());
    let (message, notification) = service.persist_message(sender_id, receiver_id, text).await?;

    // Persistence is done; everything from here on is best-effort push.
    let payload = MessagePayload::from(&message);
    state
        .hub()
        .broadcast_room(&room, &ServerEvent::ReceiveMessage { message: payload.clone() })
        .await;

    state
        .hub()
        .send_to(receiver_id, ServerEvent::ReceiveMessageGlobal { message: payload })
        .await;
    state
        .hub()
        .send_to(
            receiver_id,
            ServerEvent::Notification {
                notification: NotificationPayload::from(&notification),
            },
        )
        .await;

    Ok(())
}
