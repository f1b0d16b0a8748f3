//! HTTP handlers, grouped by resource

pub mod appointments;
pub mod auth;
pub mod courses;
pub mod health;
pub mod messages;
pub mod notifications;
pub mod ratings;
pub mod reports;
pub mod users;

use skillswap_core::Snowflake;

use crate::response::ApiError;

/// Parse a Snowflake path segment
pub(crate) fn parse_id(raw: &str, what: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {what} format")))
}
