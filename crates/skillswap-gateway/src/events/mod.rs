//! Socket event types
//!
//! The wire format is a JSON object `{"event": <name>, "data": {...}}` in
//! both directions, with snake_case event names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skillswap_core::{ChatMessage, Notification, Snowflake};

/// Events a client may send
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Bind this connection to a user identity
    RegisterUser { user_id: Snowflake },
    /// Subscribe to the room shared with another user
    JoinChat {
        user_id: Snowflake,
        other_user_id: Snowflake,
    },
    /// Send a direct message
    SendMessage {
        sender_id: Snowflake,
        receiver_id: Snowflake,
        text: String,
    },
    SendConnectionRequest { from_id: Snowflake, to_id: Snowflake },
    AcceptConnectionRequest { from_id: Snowflake, to_id: Snowflake },
    RejectConnectionRequest { from_id: Snowflake, to_id: Snowflake },
    CancelConnectionRequest { from_id: Snowflake, to_id: Snowflake },
}

/// Events pushed to clients
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Room fan-out of a stored message
    ReceiveMessage { message: MessagePayload },
    /// Direct push to the receiver, independent of room membership
    ReceiveMessageGlobal { message: MessagePayload },
    /// A stored notification, pushed live
    Notification { notification: NotificationPayload },
    /// Incoming connection request
    ConnectionRequest { from_id: Snowflake, to_id: Snowflake },
    /// Connection-request lifecycle change
    ConnectionUpdate {
        user_id: Snowflake,
        other_id: Snowflake,
        status: ConnectionUpdateStatus,
    },
}

/// Terminal states a connection update can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionUpdateStatus {
    Accepted,
    Rejected,
    Cancelled,
}

/// Message body as pushed over the socket
#[derive(Debug, Clone, Serialize)]
pub struct MessagePayload {
    pub id: Snowflake,
    pub room_id: String,
    pub sender_id: Snowflake,
    pub receiver_id: Snowflake,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<&ChatMessage> for MessagePayload {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id,
            room_id: message.room_id.clone(),
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            text: message.text.clone(),
            created_at: message.created_at,
        }
    }
}

/// Notification body as pushed over the socket
#[derive(Debug, Clone, Serialize)]
pub struct NotificationPayload {
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Snowflake>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Notification> for NotificationPayload {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id,
            kind: notification.kind.as_str().to_string(),
            from: notification.from_id,
            content: notification.content.clone(),
            created_at: notification.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_events_deserialize_from_tagged_json() {
        let raw = r#"{"event":"send_message","data":{"sender_id":"1","receiver_id":"2","text":"hi"}}"#;
        let event: ClientEvent = serde_json::from_str(raw).unwrap();
        match event {
            ClientEvent::SendMessage { sender_id, receiver_id, text } => {
                assert_eq!(sender_id, Snowflake::new(1));
                assert_eq!(receiver_id, Snowflake::new(2));
                assert_eq!(text, "hi");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn unknown_events_are_rejected() {
        let raw = r#"{"event":"self_destruct","data":{}}"#;
        assert!(serde_json::from_str::<ClientEvent>(raw).is_err());
    }

    #[test]
    fn server_events_serialize_with_snake_case_tags() {
        let event = ServerEvent::ConnectionUpdate {
            user_id: Snowflake::new(1),
            other_id: Snowflake::new(2),
            status: ConnectionUpdateStatus::Accepted,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "connection_update");
        assert_eq!(json["data"]["status"], "accepted");
    }
}
