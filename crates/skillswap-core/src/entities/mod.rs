//! Domain entities

mod appointment;
mod connection;
mod course;
mod message;
mod notification;
mod rating;
mod report;
mod user;

pub use appointment::{Appointment, AppointmentStatus};
pub use connection::{Connection, ConnectionStatus};
pub use course::{
    Course, CourseProgress, CourseSide, CourseStatus, CourseWeek, ExchangeType, TeachingSkill,
    WeekContent,
};
pub use message::ChatMessage;
pub use notification::{Notification, NotificationKind};
pub use rating::Rating;
pub use report::{Report, ReportStatus};
pub use user::{DayAvailability, User, UserRole, WeeklyAvailability, STARTING_CREDITS};
