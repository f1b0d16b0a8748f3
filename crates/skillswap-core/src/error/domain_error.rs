//! Domain errors - error types for the domain layer

use chrono::NaiveDate;
use thiserror::Error;

use crate::value_objects::{Snowflake, TimeOfDay};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Appointment not found: {0}")]
    AppointmentNotFound(Snowflake),

    #[error("Course not found: {0}")]
    CourseNotFound(Snowflake),

    #[error("Rating not found: {0}")]
    RatingNotFound(Snowflake),

    #[error("Notification not found: {0}")]
    NotificationNotFound(Snowflake),

    #[error("Report not found: {0}")]
    ReportNotFound(Snowflake),

    // =========================================================================
    // Booking / Ledger Violations
    // =========================================================================
    #[error("This time slot is already booked")]
    SlotConflict { date: NaiveDate, time: TimeOfDay },

    #[error("Not enough credits to book a session")]
    InsufficientCredit,

    #[error("Insufficient balance to purchase credits")]
    InsufficientFunds,

    // =========================================================================
    // Course Violations
    // =========================================================================
    #[error("Invalid week number: {week} (structure has {max} weeks)")]
    InvalidWeek { week: i32, max: i32 },

    #[error("You already have a pending or active course with this user")]
    CourseAlreadyExists,

    #[error("Course proposal is not pending")]
    CourseNotPending,

    #[error("Cannot cancel a completed or rejected course")]
    CourseNotCancelable,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid appointment: {0} sessions accept no further changes")]
    TerminalStatus(&'static str),

    // =========================================================================
    // Authorization / Conflict
    // =========================================================================
    #[error("Not authorized: {0}")]
    NotAuthorized(&'static str),

    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("You have already rated this session")]
    AlreadyRated,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::AppointmentNotFound(_) => "UNKNOWN_APPOINTMENT",
            Self::CourseNotFound(_) => "UNKNOWN_COURSE",
            Self::RatingNotFound(_) => "UNKNOWN_RATING",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",
            Self::ReportNotFound(_) => "UNKNOWN_REPORT",

            Self::SlotConflict { .. } => "SLOT_CONFLICT",
            Self::InsufficientCredit => "INSUFFICIENT_CREDIT",
            Self::InsufficientFunds => "INSUFFICIENT_FUNDS",

            Self::InvalidWeek { .. } => "INVALID_WEEK",
            Self::CourseAlreadyExists => "COURSE_ALREADY_EXISTS",
            Self::CourseNotPending => "COURSE_NOT_PENDING",
            Self::CourseNotCancelable => "COURSE_NOT_CANCELABLE",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidStatus(_) => "INVALID_STATUS",
            Self::TerminalStatus(_) => "TERMINAL_STATUS",

            Self::NotAuthorized(_) => "NOT_AUTHORIZED",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::AlreadyRated => "ALREADY_RATED",

            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::AppointmentNotFound(_)
                | Self::CourseNotFound(_)
                | Self::RatingNotFound(_)
                | Self::NotificationNotFound(_)
                | Self::ReportNotFound(_)
        )
    }

    /// Check if this is a client-facing rule violation (HTTP 400).
    /// Slot conflicts and credit shortfalls are surfaced as 400s with
    /// readable messages, not 409s.
    pub fn is_client_violation(&self) -> bool {
        matches!(
            self,
            Self::SlotConflict { .. }
                | Self::InsufficientCredit
                | Self::InsufficientFunds
                | Self::InvalidWeek { .. }
                | Self::CourseAlreadyExists
                | Self::CourseNotPending
                | Self::CourseNotCancelable
                | Self::ValidationError(_)
                | Self::InvalidStatus(_)
                | Self::TerminalStatus(_)
        )
    }

    /// Check if this is an authorization error (HTTP 403)
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotAuthorized(_))
    }

    /// Check if this is a duplicate-resource conflict (HTTP 409)
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists | Self::AlreadyRated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes() {
        let err = DomainError::InsufficientCredit;
        assert_eq!(err.code(), "INSUFFICIENT_CREDIT");

        let err = DomainError::InvalidWeek { week: 9, max: 8 };
        assert_eq!(err.code(), "INVALID_WEEK");
    }

    #[test]
    fn booking_violations_are_client_errors() {
        let conflict = DomainError::SlotConflict {
            date: "2025-01-01".parse().unwrap(),
            time: TimeOfDay::new(10, 0).unwrap(),
        };
        assert!(conflict.is_client_violation());
        assert!(DomainError::InsufficientCredit.is_client_violation());
        assert!(DomainError::InsufficientFunds.is_client_violation());
        assert!(!DomainError::EmailAlreadyExists.is_client_violation());
    }

    #[test]
    fn classification_is_disjoint() {
        let err = DomainError::UserNotFound(Snowflake::new(1));
        assert!(err.is_not_found());
        assert!(!err.is_client_violation());
        assert!(!err.is_authorization());
        assert!(!err.is_conflict());
    }

    #[test]
    fn error_display() {
        let err = DomainError::AppointmentNotFound(Snowflake::new(77));
        assert_eq!(err.to_string(), "Appointment not found: 77");
    }
}
