//! Booking service
//!
//! Creates, reschedules, and cancels appointments while holding the slot
//! and credit invariants. The debit+insert and cancel+refund pairs are
//! delegated to transactional repository methods; this layer contributes
//! the validation, authorization, and session-window queries.

use chrono::{DateTime, Utc};
use skillswap_core::{
    Appointment, AppointmentStatus, DomainError, Snowflake, TimeOfDay,
};
use tracing::{info, instrument};

use crate::dto::{
    AppointmentFilter, AppointmentResponse, CreateAppointmentRequest,
    RescheduleAppointmentRequest, SessionLookupResponse, UpdateAppointmentStatusRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Booking service
pub struct BookingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BookingService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Book a session. The logged-in user is the student; one credit is
    /// debited atomically with the insert.
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        student_id: Snowflake,
        request: CreateAppointmentRequest,
    ) -> ServiceResult<AppointmentResponse> {
        if request.teacher == student_id {
            return Err(ServiceError::validation("Cannot book a session with yourself"));
        }

        let time = TimeOfDay::parse(&request.time)
            .map_err(|e| ServiceError::validation(format!("Invalid time: {e}")))?;

        self.ctx
            .user_repo()
            .find_by_id(request.teacher)
            .await?
            .ok_or(DomainError::UserNotFound(request.teacher))?;

        // Friendly precheck; the partial unique indexes remain the
        // authority under concurrency.
        if self
            .ctx
            .appointment_repo()
            .slot_taken(request.teacher, student_id, request.date, time, None)
            .await?
        {
            return Err(DomainError::SlotConflict {
                date: request.date,
                time,
            }
            .into());
        }

        let mut appointment = Appointment::new(
            self.ctx.generate_id(),
            request.teacher,
            student_id,
            request.date,
            time,
        );
        appointment.course_id = request.course;
        appointment.week = request.week;

        self.ctx.appointment_repo().create_booked(&appointment).await?;

        info!(
            appointment_id = %appointment.id,
            teacher_id = %appointment.teacher_id,
            student_id = %appointment.student_id,
            "Appointment booked"
        );

        Ok(AppointmentResponse::from(&appointment))
    }

    /// List appointments, optionally filtered by teacher/student
    #[instrument(skip(self))]
    pub async fn list(&self, filter: AppointmentFilter) -> ServiceResult<Vec<AppointmentResponse>> {
        let appointments = self
            .ctx
            .appointment_repo()
            .find_filtered(filter.teacher, filter.student)
            .await?;
        Ok(appointments.iter().map(AppointmentResponse::from).collect())
    }

    /// Fetch a single appointment
    #[instrument(skip(self))]
    pub async fn get(&self, id: Snowflake) -> ServiceResult<AppointmentResponse> {
        let appointment = self
            .ctx
            .appointment_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::AppointmentNotFound(id))?;
        Ok(AppointmentResponse::from(&appointment))
    }

    /// Update the status. A transition into `canceled` refunds the
    /// student's credit exactly once; other transitions are plain updates.
    #[instrument(skip(self, request))]
    pub async fn update_status(
        &self,
        id: Snowflake,
        user_id: Snowflake,
        request: UpdateAppointmentStatusRequest,
    ) -> ServiceResult<AppointmentResponse> {
        let status = AppointmentStatus::parse(&request.status)
            .ok_or_else(|| DomainError::InvalidStatus(request.status.clone()))?;

        let appointment = self
            .ctx
            .appointment_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::AppointmentNotFound(id))?;

        if !appointment.involves(user_id) {
            return Err(DomainError::NotAuthorized("not a participant of this appointment").into());
        }

        let updated = if status == AppointmentStatus::Canceled {
            // Refund idempotence lives in the repository: the credit only
            // moves when the stored status actually flips.
            self.ctx.appointment_repo().cancel_with_refund(id).await?
        } else {
            if appointment.status.is_terminal() {
                return Err(DomainError::TerminalStatus(appointment.status.as_str()).into());
            }
            self.ctx.appointment_repo().update_status(id, status).await?
        };

        info!(appointment_id = %id, status = %updated.status, "Appointment status updated");
        Ok(AppointmentResponse::from(&updated))
    }

    /// Move an appointment to a new slot, re-validating the conflict
    /// invariant against the target (teacher, date, time).
    #[instrument(skip(self, request))]
    pub async fn reschedule(
        &self,
        id: Snowflake,
        user_id: Snowflake,
        request: RescheduleAppointmentRequest,
    ) -> ServiceResult<AppointmentResponse> {
        let time = TimeOfDay::parse(&request.time)
            .map_err(|e| ServiceError::validation(format!("Invalid time: {e}")))?;

        let mut appointment = self
            .ctx
            .appointment_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::AppointmentNotFound(id))?;

        if !appointment.involves(user_id) {
            return Err(DomainError::NotAuthorized("not a participant of this appointment").into());
        }

        appointment.teacher_id = request.teacher.unwrap_or(appointment.teacher_id);
        appointment.date = request.date;
        appointment.time = time;
        if let Some(status) = &request.status {
            appointment.status = AppointmentStatus::parse(status)
                .ok_or_else(|| DomainError::InvalidStatus(status.clone()))?;
        }

        if self
            .ctx
            .appointment_repo()
            .slot_taken(
                appointment.teacher_id,
                appointment.student_id,
                appointment.date,
                appointment.time,
                Some(id),
            )
            .await?
        {
            return Err(DomainError::SlotConflict {
                date: appointment.date,
                time,
            }
            .into());
        }

        self.ctx.appointment_repo().reschedule(&appointment).await?;

        info!(appointment_id = %id, date = %appointment.date, time = %appointment.time, "Appointment rescheduled");
        Ok(AppointmentResponse::from(&appointment))
    }

    /// The session to surface on the dashboard: a currently active
    /// confirmed session wins; otherwise the earliest future one.
    #[instrument(skip(self))]
    pub async fn next_session(
        &self,
        user_id: Snowflake,
        now: DateTime<Utc>,
    ) -> ServiceResult<SessionLookupResponse> {
        let confirmed = self.ctx.appointment_repo().find_confirmed(user_id).await?;
        let next = select_next_session(&confirmed, now);
        Ok(SessionLookupResponse {
            appointment: next.map(AppointmentResponse::from),
        })
    }

    /// The confirmed session whose window contains `now`, if any
    #[instrument(skip(self))]
    pub async fn active_session(
        &self,
        user_id: Snowflake,
        now: DateTime<Utc>,
    ) -> ServiceResult<SessionLookupResponse> {
        let confirmed = self.ctx.appointment_repo().find_confirmed(user_id).await?;
        let active = confirmed.iter().find(|a| a.is_active_at(now));
        Ok(SessionLookupResponse {
            appointment: active.map(AppointmentResponse::from),
        })
    }

    /// Delete an appointment (participant or admin)
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let appointment = self
            .ctx
            .appointment_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::AppointmentNotFound(id))?;

        let requester = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        if !appointment.involves(user_id) && !requester.is_admin() {
            return Err(DomainError::NotAuthorized("not a participant of this appointment").into());
        }

        self.ctx.appointment_repo().delete(id).await?;
        info!(appointment_id = %id, "Appointment deleted");
        Ok(())
    }
}

/// Pick the session to surface: an active one (window contains `now`)
/// takes priority over future ones; otherwise the earliest strictly
/// future session.
fn select_next_session(
    confirmed: &[Appointment],
    now: DateTime<Utc>,
) -> Option<&Appointment> {
    if let Some(active) = confirmed.iter().find(|a| a.window_contains(now)) {
        return Some(active);
    }
    confirmed
        .iter()
        .filter(|a| a.starts_at() > now)
        .min_by_key(|a| a.starts_at())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confirmed_at(id: i64, date: &str, time: &str) -> Appointment {
        let mut appointment = Appointment::new(
            Snowflake::new(id),
            Snowflake::new(1),
            Snowflake::new(2),
            date.parse().unwrap(),
            TimeOfDay::parse(time).unwrap(),
        );
        appointment.status = AppointmentStatus::Confirmed;
        appointment
    }

    #[test]
    fn active_session_wins_over_future_ones() {
        let sessions = vec![
            confirmed_at(1, "2025-03-10", "15:00"),
            confirmed_at(2, "2025-03-10", "10:00"),
        ];
        let now = "2025-03-10T10:30:00Z".parse().unwrap();
        let next = select_next_session(&sessions, now).unwrap();
        assert_eq!(next.id, Snowflake::new(2));
    }

    #[test]
    fn earliest_future_session_otherwise() {
        let sessions = vec![
            confirmed_at(1, "2025-03-11", "09:00"),
            confirmed_at(2, "2025-03-10", "15:00"),
            confirmed_at(3, "2025-03-10", "08:00"),
        ];
        // 12:00: the 08:00 session is over, 15:00 today is the earliest
        let now = "2025-03-10T12:00:00Z".parse().unwrap();
        let next = select_next_session(&sessions, now).unwrap();
        assert_eq!(next.id, Snowflake::new(2));
    }

    #[test]
    fn no_sessions_after_everything_ended() {
        let sessions = vec![confirmed_at(1, "2025-03-10", "10:00")];
        let now = "2025-03-10T11:01:00Z".parse().unwrap();
        assert!(select_next_session(&sessions, now).is_none());
    }

    #[test]
    fn boundary_of_the_window_counts_as_active() {
        let sessions = vec![confirmed_at(1, "2025-03-10", "10:00")];
        let now = "2025-03-10T11:00:00Z".parse().unwrap();
        assert!(select_next_session(&sessions, now).is_some());
    }
}
