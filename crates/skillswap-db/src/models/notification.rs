//! Notification database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the notifications table
#[derive(Debug, Clone, FromRow)]
pub struct NotificationModel {
    pub id: i64,
    pub user_id: i64,
    pub kind: String,
    pub from_id: Option<i64>,
    pub content: String,
    pub read: bool,
    pub seen: bool,
    pub created_at: DateTime<Utc>,
}
