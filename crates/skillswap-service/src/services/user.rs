//! User profile service

use skillswap_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    ConnectionsResponse, CurrentUserResponse, UpdateUserRequest, UserResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The current user's full profile
    #[instrument(skip(self))]
    pub async fn me(&self, user_id: Snowflake) -> ServiceResult<CurrentUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;
        Ok(CurrentUserResponse::from(&user))
    }

    /// Another user's public profile
    #[instrument(skip(self))]
    pub async fn get(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;
        Ok(UserResponse::from(&user))
    }

    /// Update profile fields (name, avatar, skills, availability)
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        user_id: Snowflake,
        request: UpdateUserRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        if let Some(full_name) = request.full_name {
            user.full_name = full_name;
        }
        if let Some(avatar) = request.avatar {
            user.avatar = Some(avatar);
        }
        if let Some(teaching) = request.teaching_skills {
            user.teaching_skills = teaching;
        }
        if let Some(learning) = request.learning_skills {
            user.learning_skills = learning;
        }
        if let Some(availability) = request.availability {
            user.availability = availability;
        }

        self.ctx.user_repo().update(&user).await?;
        info!(user_id = %user_id, "Profile updated");
        Ok(CurrentUserResponse::from(&user))
    }

    /// Delete the account; appointments cascade with it
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: Snowflake) -> ServiceResult<()> {
        self.ctx.user_repo().delete(user_id).await?;
        info!(user_id = %user_id, "Account deleted");
        Ok(())
    }

    /// The user's connection graph: accepted connections plus pending
    /// requests in both directions
    #[instrument(skip(self))]
    pub async fn connections(&self, user_id: Snowflake) -> ServiceResult<ConnectionsResponse> {
        let connections = self.ctx.connection_repo().connections_of(user_id).await?;
        let sent = self.ctx.connection_repo().pending_from(user_id).await?;
        let received = self.ctx.connection_repo().pending_for(user_id).await?;

        Ok(ConnectionsResponse {
            connections,
            sent_requests: sent.into_iter().map(|c| c.addressee_id).collect(),
            received_requests: received.into_iter().map(|c| c.requester_id).collect(),
        })
    }
}
