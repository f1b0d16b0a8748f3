//! Route definitions
//!
//! All API routes organized by resource and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{
    appointments, auth, courses, health, messages, notifications, ratings, reports, users,
};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health, which
/// bypasses rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(appointment_routes())
        .merge(course_routes())
        .merge(rating_routes())
        .merge(notification_routes())
        .merge(message_routes())
        .merge(report_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/verify-email", post(auth::verify_email))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me", get(users::get_current_user))
        .route("/users/@me", patch(users::update_current_user))
        .route("/users/@me", delete(users::delete_current_user))
        .route("/users/@me/credits/purchase", post(users::purchase_credits))
        .route("/users/@me/connections", get(users::get_connections))
        .route("/users/:user_id", get(users::get_user))
}

/// Appointment routes (the booking surface)
fn appointment_routes() -> Router<AppState> {
    Router::new()
        .route("/appointments", post(appointments::create_appointment))
        .route("/appointments", get(appointments::get_appointments))
        .route("/appointments/next", get(appointments::next_session))
        .route("/appointments/active", get(appointments::active_session))
        .route(
            "/appointments/change-schedule/:appointment_id",
            patch(appointments::reschedule_appointment),
        )
        .route("/appointments/:appointment_id", get(appointments::get_appointment))
        .route(
            "/appointments/:appointment_id",
            patch(appointments::update_appointment_status),
        )
        .route(
            "/appointments/:appointment_id",
            delete(appointments::delete_appointment),
        )
}

/// Course routes
fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", post(courses::propose_course))
        .route("/courses", get(courses::get_my_courses))
        .route("/courses/proposals", get(courses::get_course_proposals))
        .route(
            "/courses/availability/:user_id",
            get(courses::get_counterpart_availability),
        )
        .route("/courses/:course_id", get(courses::get_course))
        .route("/courses/:course_id/accept", post(courses::accept_course))
        .route("/courses/:course_id/reject", post(courses::reject_course))
        .route("/courses/:course_id/cancel", post(courses::cancel_course))
        .route(
            "/courses/:course_id/weeks/:week/:side",
            patch(courses::update_course_week),
        )
        .route(
            "/courses/:course_id/weeks/:week/:side/complete",
            patch(courses::complete_course_week),
        )
        .route("/courses/:course_id/stats", get(courses::get_course_stats))
}

/// Rating routes
fn rating_routes() -> Router<AppState> {
    Router::new()
        .route("/ratings", post(ratings::submit_rating))
        .route("/ratings/teacher/:teacher_id", get(ratings::get_teacher_ratings))
        .route("/ratings/:rating_id/reply", post(ratings::reply_to_rating))
}

/// Notification routes
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(notifications::get_notifications))
        .route("/notifications/unread-count", get(notifications::get_unread_count))
        .route("/notifications/read", patch(notifications::mark_notifications_read))
        .route(
            "/notifications/:notification_id/seen",
            patch(notifications::mark_seen_or_delete),
        )
        .route(
            "/notifications/:notification_id",
            delete(notifications::delete_notification),
        )
}

/// Chat history routes
fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages/conversations", get(messages::get_conversations))
        .route("/messages/:room_id", get(messages::get_room_messages))
        .route("/messages/:room_id/read", patch(messages::mark_room_read))
}

/// Report routes
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/reports", post(reports::create_report))
        .route("/reports", get(reports::list_reports))
        .route("/reports/:report_id", patch(reports::resolve_report))
}
