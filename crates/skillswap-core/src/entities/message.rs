//! Chat message entity

use chrono::{DateTime, Utc};

use crate::value_objects::{room_id, Snowflake};

/// A direct message between two users, keyed by their shared room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: Snowflake,
    /// Sorted join of the two participant IDs
    pub room_id: String,
    pub sender_id: Snowflake,
    pub receiver_id: Snowflake,
    pub text: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a new unread message; the room ID is derived, never supplied.
    pub fn new(id: Snowflake, sender_id: Snowflake, receiver_id: Snowflake, text: String) -> Self {
        Self {
            id,
            room_id: room_id(sender_id, receiver_id),
            sender_id,
            receiver_id,
            text,
            read: false,
            created_at: Utc::now(),
        }
    }

    /// The participant that is not `user_id`
    pub fn other_party(&self, user_id: Snowflake) -> Snowflake {
        if self.sender_id == user_id {
            self.receiver_id
        } else {
            self.sender_id
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_id_is_direction_independent() {
        let a = Snowflake::new(7);
        let b = Snowflake::new(2);
        let forward = ChatMessage::new(Snowflake::new(1), a, b, "hi".to_string());
        let backward = ChatMessage::new(Snowflake::new(2), b, a, "hello".to_string());
        assert_eq!(forward.room_id, backward.room_id);
        assert_eq!(forward.room_id, "2_7");
    }

    #[test]
    fn other_party_flips_correctly() {
        let message = ChatMessage::new(
            Snowflake::new(1),
            Snowflake::new(5),
            Snowflake::new(9),
            "hey".to_string(),
        );
        assert_eq!(message.other_party(Snowflake::new(5)), Snowflake::new(9));
        assert_eq!(message.other_party(Snowflake::new(9)), Snowflake::new(5));
    }
}
