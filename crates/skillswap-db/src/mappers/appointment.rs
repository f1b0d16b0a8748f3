//! Appointment entity <-> model mapper

use skillswap_core::{Appointment, AppointmentStatus, DomainError, Snowflake, TimeOfDay};

use crate::models::AppointmentModel;

impl TryFrom<AppointmentModel> for Appointment {
    type Error = DomainError;

    fn try_from(model: AppointmentModel) -> Result<Self, Self::Error> {
        let time = TimeOfDay::parse(&model.time_of_day).map_err(|e| {
            DomainError::InternalError(format!(
                "corrupt time_of_day '{}' on appointment {}: {e}",
                model.time_of_day, model.id
            ))
        })?;
        let status = AppointmentStatus::parse(&model.status).ok_or_else(|| {
            DomainError::InternalError(format!(
                "corrupt status '{}' on appointment {}",
                model.status, model.id
            ))
        })?;

        Ok(Appointment {
            id: Snowflake::new(model.id),
            teacher_id: Snowflake::new(model.teacher_id),
            student_id: Snowflake::new(model.student_id),
            date: model.date,
            time,
            status,
            course_id: model.course_id.map(Snowflake::new),
            week: model.week,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
