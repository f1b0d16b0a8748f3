//! JWT utilities for authentication
//!
//! Stateless access/refresh token pairs signed with a shared secret. The
//! token kind travels in the claims so an access token can never pass as
//! a refresh token or vice versa.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use skillswap_core::Snowflake;

use crate::error::AppError;

/// What a token is good for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's Snowflake ID as a string
    pub sub: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
    /// Access or refresh
    pub token_type: TokenType,
}

impl Claims {
    /// The subject as a Snowflake
    pub fn user_id(&self) -> Result<Snowflake, AppError> {
        Snowflake::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }

    #[must_use]
    pub fn is_access_token(&self) -> bool {
        self.token_type == TokenType::Access
    }

    #[must_use]
    pub fn is_refresh_token(&self) -> bool {
        self.token_type == TokenType::Refresh
    }
}

/// A freshly issued access/refresh pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Issues and validates token pairs
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_expiry: i64,
    refresh_expiry: i64,
}

impl JwtService {
    /// Build from the shared secret and expiry windows (seconds)
    pub fn new(secret: &str, access_expiry: i64, refresh_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_expiry,
            refresh_expiry,
        }
    }

    /// Issue an access/refresh token pair for a user
    pub fn issue_pair(&self, user_id: Snowflake) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.sign(user_id, TokenType::Access, self.access_expiry)?,
            refresh_token: self.sign(user_id, TokenType::Refresh, self.refresh_expiry)?,
            token_type: "Bearer".to_string(),
            expires_in: self.access_expiry,
        })
    }

    /// Validate an access token and return its claims
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.open(token, TokenType::Access)
    }

    /// Validate a refresh token and return its claims
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.open(token, TokenType::Refresh)
    }

    fn sign(&self, user_id: Snowflake, kind: TokenType, ttl: i64) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl)).timestamp(),
            token_type: kind,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Token encoding failed: {e}")))
    }

    fn open(&self, token: &str, expected: TokenType) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })?;

        if data.claims.token_type != expected {
            return Err(AppError::InvalidToken);
        }
        Ok(data.claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_expiry", &self.access_expiry)
            .field("refresh_expiry", &self.refresh_expiry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret-at-least-32-bytes-long", 900, 604_800)
    }

    #[test]
    fn issue_and_validate_pair() {
        let jwt = service();
        let pair = jwt.issue_pair(Snowflake::new(42)).unwrap();

        let claims = jwt.validate_access_token(&pair.access_token).unwrap();
        assert_eq!(claims.user_id().unwrap(), Snowflake::new(42));
        assert!(claims.is_access_token());

        let claims = jwt.validate_refresh_token(&pair.refresh_token).unwrap();
        assert!(claims.is_refresh_token());
    }

    #[test]
    fn token_types_are_not_interchangeable() {
        let jwt = service();
        let pair = jwt.issue_pair(Snowflake::new(1)).unwrap();

        assert!(jwt.validate_access_token(&pair.refresh_token).is_err());
        assert!(jwt.validate_refresh_token(&pair.access_token).is_err());
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        assert!(service().validate_access_token("not-a-jwt").is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let issuer = service();
        let verifier = JwtService::new("a-completely-different-secret-value", 900, 900);
        let pair = issuer.issue_pair(Snowflake::new(1)).unwrap();
        assert!(verifier.validate_access_token(&pair.access_token).is_err());
    }
}
