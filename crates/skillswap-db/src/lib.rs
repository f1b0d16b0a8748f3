//! # skillswap-db
//!
//! PostgreSQL implementations of the domain repository traits.

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_pool_from_env, DatabaseConfig};
pub use repositories::{
    PgAppointmentRepository, PgConnectionRepository, PgCourseRepository, PgMessageRepository,
    PgNotificationRepository, PgRatingRepository, PgReportRepository, PgUserRepository,
};

// Re-export for consumers that need the pool type
pub use sqlx::PgPool;
