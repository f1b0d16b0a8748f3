//! Application configuration structs
//!
//! Everything is loaded from environment variables; a `.env` file is
//! honored for development. Only SERVER_PORT, DATABASE_URL, and
//! JWT_SECRET are mandatory.

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub snowflake: SnowflakeConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a required environment variable is missing
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: opt("APP_NAME").unwrap_or_else(|| "skillswap".into()),
                env: Environment::from_env(),
            },
            server: ServerConfig {
                host: opt("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".into()),
                port: parsed("SERVER_PORT").ok_or(ConfigError::MissingVar("SERVER_PORT"))?,
            },
            database: DatabaseConfig {
                url: opt("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parsed("DATABASE_MAX_CONNECTIONS").unwrap_or(20),
                min_connections: parsed("DATABASE_MIN_CONNECTIONS").unwrap_or(5),
            },
            jwt: JwtConfig {
                secret: opt("JWT_SECRET").ok_or(ConfigError::MissingVar("JWT_SECRET"))?,
                access_token_expiry: parsed("JWT_ACCESS_TOKEN_EXPIRY").unwrap_or(900),
                refresh_token_expiry: parsed("JWT_REFRESH_TOKEN_EXPIRY").unwrap_or(604_800),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parsed("RATE_LIMIT_REQUESTS_PER_SECOND").unwrap_or(10),
                burst: parsed("RATE_LIMIT_BURST").unwrap_or(50),
            },
            cors: CorsConfig {
                allowed_origins: opt("CORS_ALLOWED_ORIGINS")
                    .map(|value| value.split(',').map(str::trim).map(String::from).collect())
                    .unwrap_or_default(),
            },
            snowflake: SnowflakeConfig {
                worker_id: parsed("WORKER_ID").unwrap_or(0),
            },
        })
    }
}

fn opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    opt(name).and_then(|v| v.parse().ok())
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    fn from_env() -> Self {
        match opt("APP_ENV").as_deref() {
            Some("production") => Self::Production,
            Some("staging") => Self::Staging,
            _ => Self::Development,
        }
    }

    #[must_use]
    pub fn is_production(&self) -> bool {
        *self == Self::Production
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        *self == Self::Development
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// JWT configuration (expiries in seconds)
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    pub worker_id: u16,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_predicates() {
        assert!(Environment::Production.is_production());
        assert!(!Environment::Development.is_production());
        assert!(Environment::Development.is_development());
        assert!(!Environment::Staging.is_development());
    }

    #[test]
    fn server_address_formats_host_and_port() {
        let server = ServerConfig {
            host: "0.0.0.0".into(),
            port: 3000,
        };
        assert_eq!(server.address(), "0.0.0.0:3000");
    }

    #[test]
    fn parsed_ignores_garbage() {
        std::env::set_var("APP_CONFIG_TEST_GARBAGE", "not-a-number");
        assert_eq!(parsed::<u32>("APP_CONFIG_TEST_GARBAGE"), None);
        std::env::remove_var("APP_CONFIG_TEST_GARBAGE");
    }
}
