//! PostgreSQL implementation of RatingRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use skillswap_core::{DomainError, Rating, RatingRepository, RepoResult, Snowflake};

use crate::models::RatingModel;

use super::error::{map_db_error, map_unique_violation, rating_not_found};

const RATING_COLUMNS: &str =
    "id, teacher_id, student_id, session_id, score, review, reply, created_at";

/// PostgreSQL implementation of RatingRepository
#[derive(Clone)]
pub struct PgRatingRepository {
    pool: PgPool,
}

impl PgRatingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingRepository for PgRatingRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Rating>> {
        let result = sqlx::query_as::<_, RatingModel>(&format!(
            "SELECT {RATING_COLUMNS} FROM ratings WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Rating::from))
    }

    #[instrument(skip(self, rating))]
    async fn create(&self, rating: &Rating) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO ratings (id, teacher_id, student_id, session_id, score, review, reply, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(rating.id.into_inner())
        .bind(rating.teacher_id.into_inner())
        .bind(rating.student_id.into_inner())
        .bind(rating.session_id.into_inner())
        .bind(rating.score)
        .bind(&rating.review)
        .bind(&rating.reply)
        .bind(rating.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyRated))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn exists_for_session(
        &self,
        session_id: Snowflake,
        student_id: Snowflake,
    ) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM ratings WHERE session_id = $1 AND student_id = $2)",
        )
        .bind(session_id.into_inner())
        .bind(student_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_for_teacher(
        &self,
        teacher_id: Snowflake,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Rating>> {
        let models = sqlx::query_as::<_, RatingModel>(&format!(
            r"
            SELECT {RATING_COLUMNS} FROM ratings
            WHERE teacher_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "
        ))
        .bind(teacher_id.into_inner())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(Rating::from).collect())
    }

    #[instrument(skip(self))]
    async fn average_for_teacher(&self, teacher_id: Snowflake) -> RepoResult<Option<f64>> {
        sqlx::query_scalar::<_, Option<f64>>(
            "SELECT AVG(score)::FLOAT8 FROM ratings WHERE teacher_id = $1",
        )
        .bind(teacher_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, reply))]
    async fn set_reply(&self, id: Snowflake, reply: &str) -> RepoResult<()> {
        let result = sqlx::query("UPDATE ratings SET reply = $2 WHERE id = $1")
            .bind(id.into_inner())
            .bind(reply)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(rating_not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgRatingRepository>();
    }
}
