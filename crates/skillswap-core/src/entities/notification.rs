//! Notification entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Notification entity, persisted as a side effect of messaging and
/// connection-request transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Snowflake,
    /// Recipient
    pub user_id: Snowflake,
    pub kind: NotificationKind,
    /// Originating user, when there is one
    pub from_id: Option<Snowflake>,
    pub content: String,
    pub read: bool,
    pub seen: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        kind: NotificationKind,
        from_id: Option<Snowflake>,
        content: String,
    ) -> Self {
        Self {
            id,
            user_id,
            kind,
            from_id,
            content,
            read: false,
            seen: false,
            created_at: Utc::now(),
        }
    }
}

/// What triggered the notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Message,
    ConnectionRequest,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::ConnectionRequest => "connection_request",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "message" => Some(Self::Message),
            "connection_request" => Some(Self::ConnectionRequest),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_notifications_start_unread_and_unseen() {
        let notification = Notification::new(
            Snowflake::new(1),
            Snowflake::new(2),
            NotificationKind::Message,
            Some(Snowflake::new(3)),
            "New message".to_string(),
        );
        assert!(!notification.read);
        assert!(!notification.seen);
    }

    #[test]
    fn kind_roundtrip() {
        assert_eq!(
            NotificationKind::parse("connection_request"),
            Some(NotificationKind::ConnectionRequest)
        );
        assert_eq!(NotificationKind::Message.as_str(), "message");
        assert_eq!(NotificationKind::parse("unknown"), None);
    }
}
