//! Rating database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the ratings table
#[derive(Debug, Clone, FromRow)]
pub struct RatingModel {
    pub id: i64,
    pub teacher_id: i64,
    pub student_id: i64,
    pub session_id: i64,
    pub score: i16,
    pub review: String,
    pub reply: Option<String>,
    pub created_at: DateTime<Utc>,
}
