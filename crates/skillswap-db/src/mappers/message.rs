//! Chat message entity <-> model mapper

use skillswap_core::{ChatMessage, Snowflake};

use crate::models::MessageModel;

impl From<MessageModel> for ChatMessage {
    fn from(model: MessageModel) -> Self {
        ChatMessage {
            id: Snowflake::new(model.id),
            room_id: model.room_id,
            sender_id: Snowflake::new(model.sender_id),
            receiver_id: Snowflake::new(model.receiver_id),
            text: model.text,
            read: model.read,
            created_at: model.created_at,
        }
    }
}
