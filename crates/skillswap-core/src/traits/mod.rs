//! Repository traits (ports)

mod repositories;

pub use repositories::{
    AppointmentRepository, ConnectionRepository, Conversation, CourseRepository,
    MessageRepository, NotificationRepository, RatingRepository, RepoResult, ReportRepository,
    UserRepository,
};
