//! Application services

mod auth;
mod booking;
mod chat;
mod connection;
mod context;
mod course;
mod error;
mod ledger;
mod notification;
mod rating;
mod report;
mod user;

pub use auth::AuthService;
pub use booking::BookingService;
pub use chat::ChatService;
pub use connection::{ConnectionOutcome, ConnectionService};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use course::CourseService;
pub use error::{ServiceError, ServiceResult};
pub use ledger::LedgerService;
pub use notification::{NotificationService, SeenOutcome};
pub use rating::RatingService;
pub use report::ReportService;
pub use user::UserService;
