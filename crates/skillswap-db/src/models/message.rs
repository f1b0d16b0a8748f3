//! Chat message database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the messages table
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub room_id: String,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub text: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
