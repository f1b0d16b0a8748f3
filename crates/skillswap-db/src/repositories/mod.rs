//! PostgreSQL repository implementations

mod appointment;
mod connection;
mod course;
mod error;
mod message;
mod notification;
mod rating;
mod report;
mod user;

pub use appointment::PgAppointmentRepository;
pub use connection::PgConnectionRepository;
pub use course::PgCourseRepository;
pub use message::PgMessageRepository;
pub use notification::PgNotificationRepository;
pub use rating::PgRatingRepository;
pub use report::PgReportRepository;
pub use user::PgUserRepository;
