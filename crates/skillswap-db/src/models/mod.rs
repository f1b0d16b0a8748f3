//! Database models (one per table)

mod appointment;
mod connection;
mod course;
mod message;
mod notification;
mod rating;
mod report;
mod user;

pub use appointment::AppointmentModel;
pub use connection::ConnectionModel;
pub use course::{CourseModel, CourseWeekModel};
pub use message::MessageModel;
pub use notification::NotificationModel;
pub use rating::RatingModel;
pub use report::ReportModel;
pub use user::UserModel;
