//! PostgreSQL implementation of AppointmentRepository
//!
//! The booking invariants live here: debit+insert and cancel+refund are
//! single transactions, and the partial unique indexes on
//! (teacher_id, date, time_of_day) / (student_id, date, time_of_day)
//! guarantee slot uniqueness even under concurrent bookings.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use skillswap_core::{
    Appointment, AppointmentRepository, AppointmentStatus, DomainError, RepoResult, Snowflake,
    TimeOfDay,
};

use crate::models::AppointmentModel;

use super::error::{appointment_not_found, map_db_error, map_unique_violation};

const APPOINTMENT_COLUMNS: &str =
    "id, teacher_id, student_id, date, time_of_day, status, course_id, week, created_at, updated_at";

/// PostgreSQL implementation of AppointmentRepository
#[derive(Clone)]
pub struct PgAppointmentRepository {
    pool: PgPool,
}

impl PgAppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn rows_to_entities(models: Vec<AppointmentModel>) -> RepoResult<Vec<Appointment>> {
        models.into_iter().map(Appointment::try_from).collect()
    }
}

#[async_trait]
impl AppointmentRepository for PgAppointmentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Appointment>> {
        let result = sqlx::query_as::<_, AppointmentModel>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Appointment::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<Appointment>> {
        let models = sqlx::query_as::<_, AppointmentModel>(&format!(
            r"
            SELECT {APPOINTMENT_COLUMNS} FROM appointments
            WHERE teacher_id = $1 OR student_id = $1
            ORDER BY date, time_of_day
            "
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Self::rows_to_entities(models)
    }

    #[instrument(skip(self))]
    async fn find_filtered(
        &self,
        teacher: Option<Snowflake>,
        student: Option<Snowflake>,
    ) -> RepoResult<Vec<Appointment>> {
        let models = sqlx::query_as::<_, AppointmentModel>(&format!(
            r"
            SELECT {APPOINTMENT_COLUMNS} FROM appointments
            WHERE ($1::BIGINT IS NULL OR teacher_id = $1)
              AND ($2::BIGINT IS NULL OR student_id = $2)
            ORDER BY date, time_of_day
            "
        ))
        .bind(teacher.map(Snowflake::into_inner))
        .bind(student.map(Snowflake::into_inner))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Self::rows_to_entities(models)
    }

    #[instrument(skip(self))]
    async fn find_confirmed(&self, user_id: Snowflake) -> RepoResult<Vec<Appointment>> {
        let models = sqlx::query_as::<_, AppointmentModel>(&format!(
            r"
            SELECT {APPOINTMENT_COLUMNS} FROM appointments
            WHERE (teacher_id = $1 OR student_id = $1) AND status = 'confirmed'
            ORDER BY date, time_of_day
            "
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Self::rows_to_entities(models)
    }

    #[instrument(skip(self))]
    async fn slot_taken(
        &self,
        teacher_id: Snowflake,
        student_id: Snowflake,
        date: NaiveDate,
        time: TimeOfDay,
        exclude: Option<Snowflake>,
    ) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM appointments
                WHERE date = $3 AND time_of_day = $4 AND status <> 'canceled'
                  AND (teacher_id = $1 OR student_id = $2)
                  AND ($5::BIGINT IS NULL OR id <> $5)
            )
            ",
        )
        .bind(teacher_id.into_inner())
        .bind(student_id.into_inner())
        .bind(date)
        .bind(time.to_string())
        .bind(exclude.map(Snowflake::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, appointment))]
    async fn create_booked(&self, appointment: &Appointment) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Guarded debit first; zero rows means the student cannot pay.
        // Dropping the transaction rolls the debit back on any later error.
        let debited = sqlx::query(
            "UPDATE users SET credits = credits - 1, updated_at = NOW() \
             WHERE id = $1 AND credits > 0",
        )
        .bind(appointment.student_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if debited.rows_affected() == 0 {
            return Err(DomainError::InsufficientCredit);
        }

        sqlx::query(
            r"
            INSERT INTO appointments (id, teacher_id, student_id, date, time_of_day, status,
                                      course_id, week, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(appointment.id.into_inner())
        .bind(appointment.teacher_id.into_inner())
        .bind(appointment.student_id.into_inner())
        .bind(appointment.date)
        .bind(appointment.time.to_string())
        .bind(appointment.status.as_str())
        .bind(appointment.course_id.map(Snowflake::into_inner))
        .bind(appointment.week)
        .bind(appointment.created_at)
        .bind(appointment.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::SlotConflict {
                date: appointment.date,
                time: appointment.time,
            })
        })?;

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn update_status(
        &self,
        id: Snowflake,
        status: AppointmentStatus,
    ) -> RepoResult<Appointment> {
        let result = sqlx::query_as::<_, AppointmentModel>(&format!(
            r"
            UPDATE appointments SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {APPOINTMENT_COLUMNS}
            "
        ))
        .bind(id.into_inner())
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .ok_or_else(|| appointment_not_found(id))
            .and_then(Appointment::try_from)
    }

    #[instrument(skip(self))]
    async fn cancel_with_refund(&self, id: Snowflake) -> RepoResult<Appointment> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Gate on the previous status inside the statement: only the
        // transition out of a non-canceled state refunds.
        let canceled = sqlx::query_as::<_, AppointmentModel>(&format!(
            r"
            UPDATE appointments SET status = 'canceled', updated_at = NOW()
            WHERE id = $1 AND status <> 'canceled'
            RETURNING {APPOINTMENT_COLUMNS}
            "
        ))
        .bind(id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        match canceled {
            Some(model) => {
                sqlx::query(
                    "UPDATE users SET credits = credits + 1, updated_at = NOW() WHERE id = $1",
                )
                .bind(model.student_id)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;

                tx.commit().await.map_err(map_db_error)?;
                Appointment::try_from(model)
            }
            // Already canceled (idempotent re-cancel) or missing; no refund
            // either way.
            None => {
                tx.rollback().await.map_err(map_db_error)?;
                self.find_by_id(id)
                    .await?
                    .ok_or_else(|| appointment_not_found(id))
            }
        }
    }

    #[instrument(skip(self, appointment))]
    async fn reschedule(&self, appointment: &Appointment) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE appointments
            SET teacher_id = $2, date = $3, time_of_day = $4, status = $5, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(appointment.id.into_inner())
        .bind(appointment.teacher_id.into_inner())
        .bind(appointment.date)
        .bind(appointment.time.to_string())
        .bind(appointment.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::SlotConflict {
                date: appointment.date,
                time: appointment.time,
            })
        })?;

        if result.rows_affected() == 0 {
            return Err(appointment_not_found(appointment.id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(appointment_not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgAppointmentRepository>();
    }
}
