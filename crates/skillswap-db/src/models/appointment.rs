//! Appointment database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for the appointments table
#[derive(Debug, Clone, FromRow)]
pub struct AppointmentModel {
    pub id: i64,
    pub teacher_id: i64,
    pub student_id: i64,
    pub date: NaiveDate,
    pub time_of_day: String,
    pub status: String,
    pub course_id: Option<i64>,
    pub week: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
