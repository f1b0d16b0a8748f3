//! Notification service

use skillswap_core::{DomainError, Snowflake};
use tracing::instrument;

use crate::dto::{NotificationResponse, UnreadCountResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Result of the seen-or-delete toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeenOutcome {
    /// First sighting: the seen flag was set
    Seen,
    /// Already seen: the notification was deleted
    Deleted,
}

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All notifications for the user, newest first
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: Snowflake) -> ServiceResult<Vec<NotificationResponse>> {
        let notifications = self.ctx.notification_repo().find_for_user(user_id).await?;
        Ok(notifications.iter().map(NotificationResponse::from).collect())
    }

    /// Unread count for the badge
    #[instrument(skip(self))]
    pub async fn unread_count(&self, user_id: Snowflake) -> ServiceResult<UnreadCountResponse> {
        let count = self.ctx.notification_repo().unread_count(user_id).await?;
        Ok(UnreadCountResponse { count })
    }

    /// Mark a batch as read; only the user's own rows are touched
    #[instrument(skip(self, ids))]
    pub async fn mark_read(&self, user_id: Snowflake, ids: &[Snowflake]) -> ServiceResult<u64> {
        Ok(self.ctx.notification_repo().mark_many_read(user_id, ids).await?)
    }

    /// First sighting marks seen; a second sighting deletes
    #[instrument(skip(self))]
    pub async fn mark_seen_or_delete(
        &self,
        id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<SeenOutcome> {
        let notification = self
            .ctx
            .notification_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotificationNotFound(id))?;

        if notification.user_id != user_id {
            return Err(DomainError::NotAuthorized("not your notification").into());
        }

        if notification.seen {
            self.ctx.notification_repo().delete(id).await?;
            Ok(SeenOutcome::Deleted)
        } else {
            self.ctx.notification_repo().set_seen(id).await?;
            Ok(SeenOutcome::Seen)
        }
    }

    /// Delete one of the user's own notifications
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let notification = self
            .ctx
            .notification_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotificationNotFound(id))?;

        if notification.user_id != user_id {
            return Err(DomainError::NotAuthorized("not your notification").into());
        }

        self.ctx.notification_repo().delete(id).await?;
        Ok(())
    }
}
