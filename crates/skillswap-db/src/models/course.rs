//! Course database models

use chrono::{DateTime, Utc};
use skillswap_core::WeekContent;
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for the courses table
#[derive(Debug, Clone, FromRow)]
pub struct CourseModel {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub user_a: i64,
    pub user_b: i64,
    pub exchange: String,
    pub duration_weeks: i32,
    pub user_a_skill: Option<String>,
    pub user_a_level: Option<String>,
    pub user_b_skill: String,
    pub user_b_level: Option<String>,
    pub status: String,
    pub proposed_by: i64,
    pub proposed_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for the course_weeks table
#[derive(Debug, Clone, FromRow)]
pub struct CourseWeekModel {
    pub course_id: i64,
    pub side: String,
    pub week: i32,
    pub title: String,
    pub description: String,
    pub content: Json<Vec<WeekContent>>,
    pub completed: bool,
}
