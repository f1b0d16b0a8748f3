//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize`. IDs are serialized as strings
//! for JavaScript compatibility (the Snowflake serializer handles this).

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use skillswap_core::{
    CourseProgress, CourseWeek, Snowflake, WeeklyAvailability,
};

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

// ============================================================================
// User Responses
// ============================================================================

/// Public user response (limited fields)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Snowflake,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub teaching_skills: Vec<String>,
    pub learning_skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Current authenticated user response (includes private fields)
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: Snowflake,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub credits: i32,
    pub balance: i64,
    pub availability: WeeklyAvailability,
    pub teaching_skills: Vec<String>,
    pub learning_skills: Vec<String>,
    pub role: String,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Balance and credits after a ledger operation
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CreditsResponse {
    pub balance: i64,
    pub credits: i32,
}

/// Connection graph overview for the current user
#[derive(Debug, Serialize)]
pub struct ConnectionsResponse {
    pub connections: Vec<Snowflake>,
    pub sent_requests: Vec<Snowflake>,
    pub received_requests: Vec<Snowflake>,
}

// ============================================================================
// Appointment Responses
// ============================================================================

/// Appointment response
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentResponse {
    pub id: Snowflake,
    pub teacher: Snowflake,
    pub student: Snowflake,
    pub date: NaiveDate,
    /// "HH:MM"
    pub time: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<Snowflake>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wrapper for the next/active session queries; `appointment` is null when
/// no session matches.
#[derive(Debug, Serialize)]
pub struct SessionLookupResponse {
    pub appointment: Option<AppointmentResponse>,
}

// ============================================================================
// Course Responses
// ============================================================================

/// Course response with both structures and derived progress
#[derive(Debug, Clone, Serialize)]
pub struct CourseResponse {
    pub id: Snowflake,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub user_a: Snowflake,
    pub user_b: Snowflake,
    pub exchange: String,
    pub duration_weeks: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_a_teaching_skill: Option<String>,
    pub user_b_teaching_skill: String,
    pub user_a_structure: Vec<CourseWeek>,
    pub user_b_structure: Vec<CourseWeek>,
    pub status: String,
    pub progress: CourseProgress,
    pub proposed_by: Snowflake,
    pub proposed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Result of marking a week completed
#[derive(Debug, Serialize)]
pub struct CompleteWeekResponse {
    pub week: CourseWeek,
    pub progress: CourseProgress,
    pub status: String,
}

/// Aggregate statistics of a course
#[derive(Debug, Serialize)]
pub struct CourseStatsResponse {
    pub exchange: String,
    pub total_weeks: i32,
    pub user_a_completed_weeks: i32,
    pub user_b_completed_weeks: i32,
    pub progress: CourseProgress,
    pub status: String,
}

/// Availability of a course counterpart
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub user_id: Snowflake,
    pub full_name: String,
    pub availability: WeeklyAvailability,
}

// ============================================================================
// Rating Responses
// ============================================================================

/// Single rating response
#[derive(Debug, Clone, Serialize)]
pub struct RatingResponse {
    pub id: Snowflake,
    pub teacher: Snowflake,
    pub student: Snowflake,
    pub session: Snowflake,
    pub rating: i16,
    pub review: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A teacher's ratings with the running average
#[derive(Debug, Serialize)]
pub struct TeacherRatingsResponse {
    pub ratings: Vec<RatingResponse>,
    pub average: Option<f64>,
}

// ============================================================================
// Notification Responses
// ============================================================================

/// Notification response
#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: Snowflake,
    pub user: Snowflake,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Snowflake>,
    pub content: String,
    pub read: bool,
    pub seen: bool,
    pub created_at: DateTime<Utc>,
}

/// Unread notification count
#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

// ============================================================================
// Message Responses
// ============================================================================

/// Chat message response
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: Snowflake,
    pub room_id: String,
    pub sender: Snowflake,
    pub receiver: Snowflake,
    pub text: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// A conversation summary for the chat list
#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub room_id: String,
    pub last_message: MessageResponse,
    pub unread: i64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    #[must_use]
    pub fn healthy() -> Self {
        Self { status: "ok" }
    }
}

/// Readiness probe response with dependency health
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub database: bool,
}

impl ReadinessResponse {
    #[must_use]
    pub fn ready(database: bool) -> Self {
        Self {
            ready: database,
            database,
        }
    }
}

// ============================================================================
// Report Responses
// ============================================================================

/// Report response
#[derive(Debug, Clone, Serialize)]
pub struct ReportResponse {
    pub id: Snowflake,
    pub reporter: Snowflake,
    pub reported: Snowflake,
    pub reason: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}
