//! Appointment entity - a booked tutoring session

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Snowflake, TimeOfDay};

/// Appointment entity
///
/// At most one non-canceled appointment may exist per (teacher, date, time)
/// and per (student, date, time); the storage layer enforces this with
/// partial unique indexes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub id: Snowflake,
    pub teacher_id: Snowflake,
    pub student_id: Snowflake,
    pub date: NaiveDate,
    pub time: TimeOfDay,
    pub status: AppointmentStatus,
    /// Set when the session belongs to a course week
    pub course_id: Option<Snowflake>,
    pub week: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// Create a new pending appointment
    pub fn new(
        id: Snowflake,
        teacher_id: Snowflake,
        student_id: Snowflake,
        date: NaiveDate,
        time: TimeOfDay,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            teacher_id,
            student_id,
            date,
            time,
            status: AppointmentStatus::Pending,
            course_id: None,
            week: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// UTC instant at which the session starts
    pub fn starts_at(&self) -> DateTime<Utc> {
        self.time.on(self.date)
    }

    /// UTC instant at which the session ends (fixed session length)
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.time.session_window(self.date).1
    }

    /// Whether `now` falls inside the session window `[start, end]`
    pub fn window_contains(&self, now: DateTime<Utc>) -> bool {
        let (start, end) = self.time.session_window(self.date);
        start <= now && now <= end
    }

    /// A confirmed session whose window contains `now`
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.status == AppointmentStatus::Confirmed && self.window_contains(now)
    }

    #[inline]
    pub fn involves(&self, user_id: Snowflake) -> bool {
        self.teacher_id == user_id || self.student_id == user_id
    }

    #[inline]
    pub fn is_canceled(&self) -> bool {
        self.status == AppointmentStatus::Canceled
    }
}

/// Appointment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Ongoing,
    Completed,
    Canceled,
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "ongoing" => Some(Self::Ongoing),
            "completed" => Some(Self::Completed),
            "canceled" => Some(Self::Canceled),
            _ => None,
        }
    }

    /// Completed and canceled sessions accept no further transitions
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Canceled)
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appointment_at(date: &str, time: &str) -> Appointment {
        let mut appointment = Appointment::new(
            Snowflake::new(1),
            Snowflake::new(10),
            Snowflake::new(20),
            date.parse().unwrap(),
            TimeOfDay::parse(time).unwrap(),
        );
        appointment.status = AppointmentStatus::Confirmed;
        appointment
    }

    #[test]
    fn window_contains_now_inside_session() {
        let appointment = appointment_at("2025-03-10", "10:00");
        let now = "2025-03-10T10:30:00Z".parse().unwrap();
        assert!(appointment.is_active_at(now));
    }

    #[test]
    fn window_excludes_now_after_session() {
        let appointment = appointment_at("2025-03-10", "10:00");
        let now = "2025-03-10T11:01:00Z".parse().unwrap();
        assert!(!appointment.is_active_at(now));
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let appointment = appointment_at("2025-03-10", "10:00");
        assert!(appointment.is_active_at("2025-03-10T10:00:00Z".parse().unwrap()));
        assert!(appointment.is_active_at("2025-03-10T11:00:00Z".parse().unwrap()));
    }

    #[test]
    fn pending_session_is_never_active() {
        let mut appointment = appointment_at("2025-03-10", "10:00");
        appointment.status = AppointmentStatus::Pending;
        let now = "2025-03-10T10:30:00Z".parse().unwrap();
        assert!(!appointment.is_active_at(now));
    }

    #[test]
    fn status_parse_roundtrip() {
        for status in [
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Ongoing,
            AppointmentStatus::Completed,
            AppointmentStatus::Canceled,
        ] {
            assert_eq!(AppointmentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(AppointmentStatus::parse("postponed"), None);
    }
}
