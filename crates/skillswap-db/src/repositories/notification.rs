//! PostgreSQL implementation of NotificationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use skillswap_core::{
    Notification, NotificationKind, NotificationRepository, RepoResult, Snowflake,
};

use crate::models::NotificationModel;

use super::error::{map_db_error, notification_not_found};

const NOTIFICATION_COLUMNS: &str = "id, user_id, kind, from_id, content, read, seen, created_at";

/// PostgreSQL implementation of NotificationRepository
#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>> {
        let result = sqlx::query_as::<_, NotificationModel>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Notification::try_from).transpose()
    }

    #[instrument(skip(self, notification))]
    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO notifications (id, user_id, kind, from_id, content, read, seen, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(notification.id.into_inner())
        .bind(notification.user_id.into_inner())
        .bind(notification.kind.as_str())
        .bind(notification.from_id.map(Snowflake::into_inner))
        .bind(&notification.content)
        .bind(notification.read)
        .bind(notification.seen)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<Notification>> {
        let models = sqlx::query_as::<_, NotificationModel>(&format!(
            r"
            SELECT {NOTIFICATION_COLUMNS} FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            "
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        models.into_iter().map(Notification::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn unread_count(&self, user_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND NOT read",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, ids))]
    async fn mark_many_read(&self, user_id: Snowflake, ids: &[Snowflake]) -> RepoResult<u64> {
        let raw_ids: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();
        let result = sqlx::query(
            "UPDATE notifications SET read = TRUE WHERE user_id = $1 AND id = ANY($2)",
        )
        .bind(user_id.into_inner())
        .bind(&raw_ids)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn set_seen(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("UPDATE notifications SET seen = TRUE WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(notification_not_found(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(notification_not_found(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_between(
        &self,
        a: Snowflake,
        b: Snowflake,
        kind: NotificationKind,
    ) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            DELETE FROM notifications
            WHERE kind = $3
              AND ((user_id = $1 AND from_id = $2) OR (user_id = $2 AND from_id = $1))
            ",
        )
        .bind(a.into_inner())
        .bind(b.into_inner())
        .bind(kind.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgNotificationRepository>();
    }
}
