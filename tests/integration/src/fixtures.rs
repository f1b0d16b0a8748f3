//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests. Booking fixtures
//! hand out unique future dates so reruns against a shared database never
//! collide on a slot.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A unique future date for booking tests
pub fn unique_date() -> NaiveDate {
    let base = NaiveDate::from_ymd_opt(2031, 1, 1).expect("valid date");
    // Nanos-of-now plus the counter keeps parallel runs apart
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as i64)
        .unwrap_or(0);
    base + Duration::days((nanos % 3000) + unique_suffix() as i64 * 3001 % 300_000)
}

// ============================================================================
// Auth
// ============================================================================

/// Registration request
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        Self {
            full_name: format!("Test User {suffix}"),
            email: format!("test{nanos}x{suffix}@example.com"),
            password: "TestPass123!".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

/// Current user response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub credits: i32,
    pub balance: i64,
}

// ============================================================================
// Appointments
// ============================================================================

/// Booking request
#[derive(Debug, Serialize)]
pub struct BookAppointmentRequest {
    pub teacher: String,
    pub date: NaiveDate,
    pub time: String,
}

/// Appointment response
#[derive(Debug, Deserialize)]
pub struct AppointmentResponse {
    pub id: String,
    pub teacher: String,
    pub student: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: String,
}

/// Status update request
#[derive(Debug, Serialize)]
pub struct StatusRequest {
    pub status: String,
}

/// Next/active session lookup response
#[derive(Debug, Deserialize)]
pub struct SessionLookupResponse {
    pub appointment: Option<AppointmentResponse>,
}

// ============================================================================
// Courses
// ============================================================================

/// Course proposal request
#[derive(Debug, Serialize)]
pub struct ProposeCourseRequest {
    pub user_b: String,
    pub title: String,
    pub duration_weeks: i32,
    pub user_b_teaching_skill: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_a_teaching_skill: Option<String>,
    pub just_want_to_learn: bool,
}

impl ProposeCourseRequest {
    /// A one-way proposal: user A just learns from user B
    pub fn one_way(user_b: &str, duration_weeks: i32) -> Self {
        let suffix = unique_suffix();
        Self {
            user_b: user_b.to_string(),
            title: format!("Learn Rust {suffix}"),
            duration_weeks,
            user_b_teaching_skill: "Rust".to_string(),
            user_a_teaching_skill: None,
            just_want_to_learn: true,
        }
    }
}

/// Course response
#[derive(Debug, Deserialize)]
pub struct CourseResponse {
    pub id: String,
    pub status: String,
    pub exchange: String,
    pub duration_weeks: i32,
    pub user_a_structure: Vec<WeekResponse>,
    pub user_b_structure: Vec<WeekResponse>,
    pub progress: ProgressResponse,
}

/// Week response
#[derive(Debug, Deserialize)]
pub struct WeekResponse {
    pub week: i32,
    pub title: String,
    pub completed: bool,
}

/// Progress response
#[derive(Debug, Deserialize)]
pub struct ProgressResponse {
    pub user_a: i32,
    pub user_b: i32,
    pub overall: i32,
}

/// Complete-week response
#[derive(Debug, Deserialize)]
pub struct CompleteWeekResponse {
    pub week: WeekResponse,
    pub progress: ProgressResponse,
    pub status: String,
}

// ============================================================================
// Notifications
// ============================================================================

/// Notification response
#[derive(Debug, Deserialize)]
pub struct NotificationResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub from: Option<String>,
    pub content: String,
    pub read: bool,
}
