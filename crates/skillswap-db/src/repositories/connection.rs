//! PostgreSQL implementation of ConnectionRepository
//!
//! One row per requested pair-direction. `request` is a no-op when any
//! edge already exists between the pair in either direction.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use skillswap_core::{Connection, ConnectionRepository, RepoResult, Snowflake};

use crate::models::ConnectionModel;

use super::error::map_db_error;

const CONNECTION_COLUMNS: &str = "requester_id, addressee_id, status, created_at";

/// PostgreSQL implementation of ConnectionRepository
#[derive(Clone)]
pub struct PgConnectionRepository {
    pool: PgPool,
}

impl PgConnectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConnectionRepository for PgConnectionRepository {
    #[instrument(skip(self))]
    async fn request(&self, from: Snowflake, to: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO user_connections (requester_id, addressee_id, status)
            SELECT $1, $2, 'pending'
            WHERE NOT EXISTS (
                SELECT 1 FROM user_connections
                WHERE (requester_id = $1 AND addressee_id = $2)
                   OR (requester_id = $2 AND addressee_id = $1)
            )
            ",
        )
        .bind(from.into_inner())
        .bind(to.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn find_between(&self, a: Snowflake, b: Snowflake) -> RepoResult<Option<Connection>> {
        let result = sqlx::query_as::<_, ConnectionModel>(&format!(
            r"
            SELECT {CONNECTION_COLUMNS} FROM user_connections
            WHERE (requester_id = $1 AND addressee_id = $2)
               OR (requester_id = $2 AND addressee_id = $1)
            "
        ))
        .bind(a.into_inner())
        .bind(b.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Connection::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn accept(&self, from: Snowflake, to: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE user_connections SET status = 'accepted'
            WHERE requester_id = $1 AND addressee_id = $2 AND status = 'pending'
            ",
        )
        .bind(from.into_inner())
        .bind(to.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn remove_pending(&self, from: Snowflake, to: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM user_connections
            WHERE requester_id = $1 AND addressee_id = $2 AND status = 'pending'
            ",
        )
        .bind(from.into_inner())
        .bind(to.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn remove_all_between(&self, a: Snowflake, b: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            DELETE FROM user_connections
            WHERE (requester_id = $1 AND addressee_id = $2)
               OR (requester_id = $2 AND addressee_id = $1)
            ",
        )
        .bind(a.into_inner())
        .bind(b.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn pending_for(&self, user_id: Snowflake) -> RepoResult<Vec<Connection>> {
        let models = sqlx::query_as::<_, ConnectionModel>(&format!(
            r"
            SELECT {CONNECTION_COLUMNS} FROM user_connections
            WHERE addressee_id = $1 AND status = 'pending'
            ORDER BY created_at DESC
            "
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        models.into_iter().map(Connection::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn pending_from(&self, user_id: Snowflake) -> RepoResult<Vec<Connection>> {
        let models = sqlx::query_as::<_, ConnectionModel>(&format!(
            r"
            SELECT {CONNECTION_COLUMNS} FROM user_connections
            WHERE requester_id = $1 AND status = 'pending'
            ORDER BY created_at DESC
            "
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        models.into_iter().map(Connection::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn connections_of(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r"
            SELECT CASE WHEN requester_id = $1 THEN addressee_id ELSE requester_id END
            FROM user_connections
            WHERE (requester_id = $1 OR addressee_id = $1) AND status = 'accepted'
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(Snowflake::new).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgConnectionRepository>();
    }
}
