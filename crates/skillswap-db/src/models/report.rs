//! Report database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the reports table
#[derive(Debug, Clone, FromRow)]
pub struct ReportModel {
    pub id: i64,
    pub reporter_id: i64,
    pub reported_id: i64,
    pub reason: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}
