//! # skillswap-service
//!
//! Application layer: business logic and use cases on top of the domain
//! repositories.

pub mod dto;
pub mod services;

pub use dto::*;
pub use services::{
    AuthService, BookingService, ChatService, ConnectionOutcome, ConnectionService,
    CourseService, LedgerService, NotificationService, RatingService, ReportService,
    SeenOutcome, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};
