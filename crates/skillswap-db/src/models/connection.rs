//! User connection database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the user_connections table
#[derive(Debug, Clone, FromRow)]
pub struct ConnectionModel {
    pub requester_id: i64,
    pub addressee_id: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
