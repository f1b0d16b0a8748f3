//! # skillswap-core
//!
//! Domain layer containing entities, value objects, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Appointment, AppointmentStatus, ChatMessage, Connection, ConnectionStatus, Course,
    CourseProgress, CourseSide, CourseStatus, CourseWeek, DayAvailability, ExchangeType,
    Notification, NotificationKind, Rating, Report, ReportStatus, TeachingSkill, User, UserRole,
    WeekContent, WeeklyAvailability, STARTING_CREDITS,
};
pub use error::DomainError;
pub use traits::{
    AppointmentRepository, ConnectionRepository, Conversation, CourseRepository,
    MessageRepository, NotificationRepository, RatingRepository, RepoResult, ReportRepository,
    UserRepository,
};
pub use value_objects::{
    room_id, Snowflake, SnowflakeGenerator, SnowflakeParseError, TimeOfDay, SESSION_MINUTES,
};
