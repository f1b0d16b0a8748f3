//! Authentication service
//!
//! Registration, login, token refresh, and email verification. Email
//! delivery itself is out of scope; the verification code is generated
//! here and handed to the (external) mailer.

use skillswap_common::auth::{generate_verification_code, hash_password, verify_password};
use skillswap_common::AppError;
use skillswap_core::{DomainError, Snowflake, User};
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, CurrentUserResponse, LoginRequest, RegisterRequest, VerifyEmailRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account with the starting credit grant
    #[instrument(skip(self, request))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let user = User::new(self.ctx.generate_id(), request.full_name, request.email);
        let password_hash = hash_password(&request.password)?;

        self.ctx.user_repo().create(&user, &password_hash).await?;

        let code = generate_verification_code();
        self.ctx.user_repo().set_verification_code(user.id, &code).await?;
        // Handed to the mailer out of band; at debug level so development
        // setups can verify without an SMTP server.
        tracing::debug!(user_id = %user.id, code, "Verification code issued");

        info!(user_id = %user.id, "User registered");
        self.issue_tokens(&user)
    }

    /// Log in with email and password
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(&request.password, &hash)? {
            warn!(user_id = %user.id, "Failed login attempt");
            return Err(AppError::InvalidCredentials.into());
        }

        if user.banned {
            return Err(AppError::Banned.into());
        }

        info!(user_id = %user.id, "User logged in");
        self.issue_tokens(&user)
    }

    /// Exchange a refresh token for a fresh pair
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: &str) -> ServiceResult<AuthResponse> {
        let claims = self.ctx.jwt_service().validate_refresh_token(refresh_token)?;
        let user_id = claims.user_id()?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if user.banned {
            return Err(AppError::Banned.into());
        }

        self.issue_tokens(&user)
    }

    /// Confirm the emailed verification code
    #[instrument(skip(self, request))]
    pub async fn verify_email(&self, request: VerifyEmailRequest) -> ServiceResult<()> {
        let verified = self
            .ctx
            .user_repo()
            .verify_email(&request.email, &request.code)
            .await?;

        if !verified {
            return Err(ServiceError::validation("Invalid or expired verification code"));
        }

        info!(email = %request.email, "Email verified");
        Ok(())
    }

    /// Resolve a validated access token to a user ID (used by the socket
    /// handshake; the HTTP layer has its own extractor)
    pub fn authenticate(&self, access_token: &str) -> ServiceResult<Snowflake> {
        let claims = self.ctx.jwt_service().validate_access_token(access_token)?;
        Ok(claims.user_id()?)
    }

    fn issue_tokens(&self, user: &User) -> ServiceResult<AuthResponse> {
        let pair = self.ctx.jwt_service().issue_pair(user.id)?;
        Ok(AuthResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            expires_in: pair.expires_in,
            user: CurrentUserResponse::from(user),
        })
    }
}
