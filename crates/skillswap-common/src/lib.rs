//! # skillswap-common
//!
//! Shared utilities: configuration, application errors, auth primitives,
//! and tracing setup.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

pub use auth::{generate_verification_code, hash_password, verify_password, Claims, JwtService, TokenPair};
pub use config::{AppConfig, ConfigError, DatabaseConfig, Environment, JwtConfig, ServerConfig};
pub use error::{AppError, AppResult, ErrorResponse};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig};
