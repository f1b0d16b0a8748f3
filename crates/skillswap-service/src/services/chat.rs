//! Chat service
//!
//! Persistence half of the messaging flow. The gateway calls
//! `persist_message` and only broadcasts after it returns, so a client
//! that queries the room right after a push sees the stored message.

use skillswap_core::{
    room_id, ChatMessage, Notification, NotificationKind, Snowflake,
};
use tracing::{info, instrument};

use crate::dto::{ConversationResponse, MessageResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Chat service
pub struct ChatService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChatService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Store a message and its notification for the receiver. Returns both
    /// so the caller can push them live afterwards.
    #[instrument(skip(self, text))]
    pub async fn persist_message(
        &self,
        sender_id: Snowflake,
        receiver_id: Snowflake,
        text: String,
    ) -> ServiceResult<(ChatMessage, Notification)> {
        if text.trim().is_empty() {
            return Err(ServiceError::validation("Message text must not be empty"));
        }

        let sender = self
            .ctx
            .user_repo()
            .find_by_id(sender_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", sender_id.to_string()))?;

        let message = ChatMessage::new(self.ctx.generate_id(), sender_id, receiver_id, text);
        self.ctx.message_repo().create(&message).await?;

        let notification = Notification::new(
            self.ctx.generate_id(),
            receiver_id,
            NotificationKind::Message,
            Some(sender_id),
            format!("New message from {}", sender.full_name),
        );
        self.ctx.notification_repo().create(&notification).await?;

        info!(room_id = %message.room_id, sender_id = %sender_id, "Message persisted");
        Ok((message, notification))
    }

    /// Room history, oldest first. Only room participants may read it.
    #[instrument(skip(self))]
    pub async fn room_history(
        &self,
        room: &str,
        requester: Snowflake,
    ) -> ServiceResult<Vec<MessageResponse>> {
        if !room_members(room).is_some_and(|(a, b)| a == requester || b == requester) {
            return Err(ServiceError::permission_denied("not a member of this room"));
        }

        let messages = self.ctx.message_repo().find_by_room(room).await?;
        Ok(messages.iter().map(MessageResponse::from).collect())
    }

    /// Conversation list for the chat sidebar, latest first
    #[instrument(skip(self))]
    pub async fn conversations(&self, user_id: Snowflake) -> ServiceResult<Vec<ConversationResponse>> {
        let conversations = self.ctx.message_repo().conversations_for(user_id).await?;
        Ok(conversations.iter().map(ConversationResponse::from).collect())
    }

    /// Mark everything addressed to the reader in a room as read
    #[instrument(skip(self))]
    pub async fn mark_room_read(&self, room: &str, reader: Snowflake) -> ServiceResult<u64> {
        if !room_members(room).is_some_and(|(a, b)| a == reader || b == reader) {
            return Err(ServiceError::permission_denied("not a member of this room"));
        }
        Ok(self.ctx.message_repo().mark_room_read(room, reader).await?)
    }

    /// The canonical room for a pair of users
    pub fn room_for(&self, a: Snowflake, b: Snowflake) -> String {
        room_id(a, b)
    }
}

/// Parse the two member IDs out of a room identifier
fn room_members(room: &str) -> Option<(Snowflake, Snowflake)> {
    let (a, b) = room.split_once('_')?;
    Some((Snowflake::parse(a).ok()?, Snowflake::parse(b).ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_members_roundtrip() {
        let room = room_id(Snowflake::new(42), Snowflake::new(7));
        let (a, b) = room_members(&room).unwrap();
        assert_eq!((a, b), (Snowflake::new(7), Snowflake::new(42)));
    }

    #[test]
    fn malformed_rooms_are_rejected() {
        assert!(room_members("justone").is_none());
        assert!(room_members("a_b").is_none());
    }
}
