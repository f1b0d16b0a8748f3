//! User database model

use chrono::{DateTime, Utc};
use skillswap_core::WeeklyAvailability;
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for the users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
    pub credits: i32,
    pub balance: i64,
    pub availability: Json<WeeklyAvailability>,
    pub learning_skills: Vec<String>,
    pub teaching_skills: Vec<String>,
    pub role: String,
    pub banned: bool,
    pub email_verified: bool,
    pub verification_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
