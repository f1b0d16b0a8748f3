//! Error handling utilities for repositories

use skillswap_core::{DomainError, Snowflake};
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

pub fn user_not_found(id: Snowflake) -> DomainError {
    DomainError::UserNotFound(id)
}

pub fn appointment_not_found(id: Snowflake) -> DomainError {
    DomainError::AppointmentNotFound(id)
}

pub fn course_not_found(id: Snowflake) -> DomainError {
    DomainError::CourseNotFound(id)
}

pub fn notification_not_found(id: Snowflake) -> DomainError {
    DomainError::NotificationNotFound(id)
}

pub fn rating_not_found(id: Snowflake) -> DomainError {
    DomainError::RatingNotFound(id)
}

pub fn report_not_found(id: Snowflake) -> DomainError {
    DomainError::ReportNotFound(id)
}
