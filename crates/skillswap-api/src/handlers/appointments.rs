//! Appointment handlers
//!
//! The booking surface: create (debits a credit), status updates (cancel
//! refunds), reschedule, and the next/active session queries.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use skillswap_service::{
    AppointmentFilter, AppointmentResponse, BookingService, CreateAppointmentRequest,
    RescheduleAppointmentRequest, SessionLookupResponse, UpdateAppointmentStatusRequest,
};

use super::parse_id;
use crate::extractors::AuthUser;
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Book an appointment; the logged-in user is the student
///
/// POST /appointments
pub async fn create_appointment(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateAppointmentRequest>,
) -> ApiResult<Created<Json<AppointmentResponse>>> {
    let service = BookingService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// List appointments, optionally filtered by teacher/student
///
/// GET /appointments
pub async fn get_appointments(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(filter): Query<AppointmentFilter>,
) -> ApiResult<Json<Vec<AppointmentResponse>>> {
    let service = BookingService::new(state.service_context());
    Ok(Json(service.list(filter).await?))
}

/// The user's next (or currently active) confirmed session
///
/// GET /appointments/next
pub async fn next_session(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<SessionLookupResponse>> {
    let service = BookingService::new(state.service_context());
    Ok(Json(service.next_session(auth.user_id, Utc::now()).await?))
}

/// The user's currently active confirmed session, if any
///
/// GET /appointments/active
pub async fn active_session(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<SessionLookupResponse>> {
    let service = BookingService::new(state.service_context());
    Ok(Json(service.active_session(auth.user_id, Utc::now()).await?))
}

/// Get a single appointment
///
/// GET /appointments/{appointment_id}
pub async fn get_appointment(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(appointment_id): Path<String>,
) -> ApiResult<Json<AppointmentResponse>> {
    let appointment_id = parse_id(&appointment_id, "appointment_id")?;
    let service = BookingService::new(state.service_context());
    Ok(Json(service.get(appointment_id).await?))
}

/// Update appointment status (cancel refunds the student's credit)
///
/// PATCH /appointments/{appointment_id}
pub async fn update_appointment_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(appointment_id): Path<String>,
    Json(request): Json<UpdateAppointmentStatusRequest>,
) -> ApiResult<Json<AppointmentResponse>> {
    let appointment_id = parse_id(&appointment_id, "appointment_id")?;
    let service = BookingService::new(state.service_context());
    Ok(Json(service.update_status(appointment_id, auth.user_id, request).await?))
}

/// Move an appointment to a new slot
///
/// PATCH /appointments/change-schedule/{appointment_id}
pub async fn reschedule_appointment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(appointment_id): Path<String>,
    Json(request): Json<RescheduleAppointmentRequest>,
) -> ApiResult<Json<AppointmentResponse>> {
    let appointment_id = parse_id(&appointment_id, "appointment_id")?;
    let service = BookingService::new(state.service_context());
    Ok(Json(service.reschedule(appointment_id, auth.user_id, request).await?))
}

/// Delete an appointment (participant or admin)
///
/// DELETE /appointments/{appointment_id}
pub async fn delete_appointment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(appointment_id): Path<String>,
) -> ApiResult<NoContent> {
    let appointment_id = parse_id(&appointment_id, "appointment_id")?;
    let service = BookingService::new(state.service_context());
    service.delete(appointment_id, auth.user_id).await?;
    Ok(NoContent)
}
