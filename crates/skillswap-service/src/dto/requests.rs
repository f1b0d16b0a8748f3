//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; bodies that carry free-form
//! input also implement `Validate`. Status strings are deliberately left
//! as strings so the services can reject them with the domain's
//! invalid-status error instead of a deserialization failure.

use chrono::NaiveDate;
use serde::Deserialize;
use skillswap_core::{Snowflake, WeeklyAvailability};
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 80, message = "Full name must be 2-80 characters"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Email verification request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(equal = 6, message = "Verification code must be 6 digits"))]
    pub code: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Update current user request
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 80, message = "Full name must be 2-80 characters"))]
    pub full_name: Option<String>,

    /// Avatar file name or null to keep the current one
    pub avatar: Option<String>,

    pub teaching_skills: Option<Vec<String>>,

    pub learning_skills: Option<Vec<String>>,

    pub availability: Option<WeeklyAvailability>,
}

/// Credit purchase request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PurchaseCreditsRequest {
    #[validate(range(min = 1, message = "Amount must be at least 1"))]
    pub amount: i64,
}

// ============================================================================
// Appointment Requests
// ============================================================================

/// Book a new appointment. The logged-in user is the student.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAppointmentRequest {
    pub teacher: Snowflake,
    pub date: NaiveDate,
    /// "HH:MM"
    pub time: String,
    /// Optional course-week link
    pub course: Option<Snowflake>,
    pub week: Option<i32>,
}

/// Appointment status update
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAppointmentStatusRequest {
    pub status: String,
}

/// Appointment reschedule request
#[derive(Debug, Clone, Deserialize)]
pub struct RescheduleAppointmentRequest {
    pub date: NaiveDate,
    pub time: String,
    pub teacher: Option<Snowflake>,
    pub status: Option<String>,
}

/// Appointment list filter
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppointmentFilter {
    pub teacher: Option<Snowflake>,
    pub student: Option<Snowflake>,
}

// ============================================================================
// Course Requests
// ============================================================================

/// Course proposal. The logged-in user is user A.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProposeCourseRequest {
    pub user_b: Snowflake,

    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 1, max = 52, message = "Duration must be 1-52 weeks"))]
    pub duration_weeks: i32,

    #[validate(length(min = 1, message = "Teaching skill is required"))]
    pub user_b_teaching_skill: String,

    pub user_a_teaching_skill: Option<String>,

    #[serde(default)]
    pub just_want_to_learn: bool,
}

/// Week content/title update
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct UpdateCourseWeekRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
}

// ============================================================================
// Rating Requests
// ============================================================================

/// Submit a rating for a completed session
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitRatingRequest {
    pub teacher: Snowflake,
    pub session: Snowflake,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,

    #[validate(length(max = 2000, message = "Review must be at most 2000 characters"))]
    pub review: Option<String>,
}

/// Teacher reply to a rating
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReplyRatingRequest {
    #[validate(length(min = 1, max = 2000, message = "Reply must be 1-2000 characters"))]
    pub reply: String,
}

// ============================================================================
// Notification Requests
// ============================================================================

/// Mark a batch of notifications as read
#[derive(Debug, Clone, Deserialize)]
pub struct MarkNotificationsReadRequest {
    pub ids: Vec<Snowflake>,
}

// ============================================================================
// Report Requests
// ============================================================================

/// File a report against a user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReportRequest {
    pub reported: Snowflake,

    #[validate(length(min = 1, max = 2000, message = "Reason must be 1-2000 characters"))]
    pub reason: String,
}

/// Admin resolution of a report
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ResolveReportRequest {
    #[serde(default)]
    pub dismissed: bool,
    /// Ban the reported user as part of resolving
    #[serde(default)]
    pub ban: bool,
}
