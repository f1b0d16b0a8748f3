//! Service context - dependency container for services
//!
//! Holds all repositories and shared services. Constructed once at process
//! start and handed to every service by reference.

use std::sync::Arc;

use skillswap_common::auth::JwtService;
use skillswap_core::traits::{
    AppointmentRepository, ConnectionRepository, CourseRepository, MessageRepository,
    NotificationRepository, RatingRepository, ReportRepository, UserRepository,
};
use skillswap_core::{Snowflake, SnowflakeGenerator};
use skillswap_db::PgPool;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    pool: PgPool,

    user_repo: Arc<dyn UserRepository>,
    appointment_repo: Arc<dyn AppointmentRepository>,
    course_repo: Arc<dyn CourseRepository>,
    rating_repo: Arc<dyn RatingRepository>,
    message_repo: Arc<dyn MessageRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    connection_repo: Arc<dyn ConnectionRepository>,
    report_repo: Arc<dyn ReportRepository>,

    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn appointment_repo(&self) -> &dyn AppointmentRepository {
        self.appointment_repo.as_ref()
    }

    pub fn course_repo(&self) -> &dyn CourseRepository {
        self.course_repo.as_ref()
    }

    pub fn rating_repo(&self) -> &dyn RatingRepository {
        self.rating_repo.as_ref()
    }

    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    pub fn connection_repo(&self) -> &dyn ConnectionRepository {
        self.connection_repo.as_ref()
    }

    pub fn report_repo(&self) -> &dyn ReportRepository {
        self.report_repo.as_ref()
    }

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .finish()
    }
}

/// Builder for creating a ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    appointment_repo: Option<Arc<dyn AppointmentRepository>>,
    course_repo: Option<Arc<dyn CourseRepository>>,
    rating_repo: Option<Arc<dyn RatingRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    connection_repo: Option<Arc<dyn ConnectionRepository>>,
    report_repo: Option<Arc<dyn ReportRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn appointment_repo(mut self, repo: Arc<dyn AppointmentRepository>) -> Self {
        self.appointment_repo = Some(repo);
        self
    }

    pub fn course_repo(mut self, repo: Arc<dyn CourseRepository>) -> Self {
        self.course_repo = Some(repo);
        self
    }

    pub fn rating_repo(mut self, repo: Arc<dyn RatingRepository>) -> Self {
        self.rating_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn connection_repo(mut self, repo: Arc<dyn ConnectionRepository>) -> Self {
        self.connection_repo = Some(repo);
        self
    }

    pub fn report_repo(mut self, repo: Arc<dyn ReportRepository>) -> Self {
        self.report_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext {
            pool: self.pool.ok_or_else(|| ServiceError::validation("pool is required"))?,
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            appointment_repo: self
                .appointment_repo
                .ok_or_else(|| ServiceError::validation("appointment_repo is required"))?,
            course_repo: self
                .course_repo
                .ok_or_else(|| ServiceError::validation("course_repo is required"))?,
            rating_repo: self
                .rating_repo
                .ok_or_else(|| ServiceError::validation("rating_repo is required"))?,
            message_repo: self
                .message_repo
                .ok_or_else(|| ServiceError::validation("message_repo is required"))?,
            notification_repo: self
                .notification_repo
                .ok_or_else(|| ServiceError::validation("notification_repo is required"))?,
            connection_repo: self
                .connection_repo
                .ok_or_else(|| ServiceError::validation("connection_repo is required"))?,
            report_repo: self
                .report_repo
                .ok_or_else(|| ServiceError::validation("report_repo is required"))?,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            snowflake_generator: self
                .snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
        })
    }
}
