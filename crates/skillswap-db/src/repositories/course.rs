//! PostgreSQL implementation of CourseRepository
//!
//! Weekly structures live in the course_weeks table; updates rewrite the
//! week rows wholesale inside the course transaction (duration is fixed at
//! creation, so the set is small and stable).

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use skillswap_core::{
    Course, CourseRepository, CourseSide, CourseStatus, CourseWeek, RepoResult, Snowflake,
};

use crate::mappers::assemble_course;
use crate::models::{CourseModel, CourseWeekModel};

use super::error::{course_not_found, map_db_error};

const COURSE_COLUMNS: &str = "id, title, description, user_a, user_b, exchange, duration_weeks, \
                              user_a_skill, user_a_level, user_b_skill, user_b_level, status, \
                              proposed_by, proposed_at, accepted_at, completed_at, created_at, \
                              updated_at";

/// PostgreSQL implementation of CourseRepository
#[derive(Clone)]
pub struct PgCourseRepository {
    pool: PgPool,
}

impl PgCourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_weeks(&self, course_id: Snowflake) -> RepoResult<Vec<CourseWeekModel>> {
        sqlx::query_as::<_, CourseWeekModel>(
            r"
            SELECT course_id, side, week, title, description, content, completed
            FROM course_weeks
            WHERE course_id = $1
            ORDER BY side, week
            ",
        )
        .bind(course_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }

    async fn load_course(&self, model: CourseModel) -> RepoResult<Course> {
        let weeks = self.load_weeks(Snowflake::new(model.id)).await?;
        assemble_course(model, weeks)
    }

    async fn insert_weeks(
        tx: &mut Transaction<'_, Postgres>,
        course_id: Snowflake,
        side: CourseSide,
        weeks: &[CourseWeek],
    ) -> RepoResult<()> {
        for week in weeks {
            sqlx::query(
                r"
                INSERT INTO course_weeks (course_id, side, week, title, description, content, completed)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ",
            )
            .bind(course_id.into_inner())
            .bind(side.as_str())
            .bind(week.week)
            .bind(&week.title)
            .bind(&week.description)
            .bind(Json(&week.content))
            .bind(week.completed)
            .execute(&mut **tx)
            .await
            .map_err(map_db_error)?;
        }
        Ok(())
    }
}

#[async_trait]
impl CourseRepository for PgCourseRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Course>> {
        let model = sqlx::query_as::<_, CourseModel>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match model {
            Some(model) => Ok(Some(self.load_course(model).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn find_for_user(
        &self,
        user_id: Snowflake,
        status: Option<CourseStatus>,
    ) -> RepoResult<Vec<Course>> {
        let models = sqlx::query_as::<_, CourseModel>(&format!(
            r"
            SELECT {COURSE_COLUMNS} FROM courses
            WHERE (user_a = $1 OR user_b = $1)
              AND ($2::TEXT IS NULL OR status = $2)
            ORDER BY updated_at DESC
            "
        ))
        .bind(user_id.into_inner())
        .bind(status.map(CourseStatus::as_str))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut courses = Vec::with_capacity(models.len());
        for model in models {
            courses.push(self.load_course(model).await?);
        }
        Ok(courses)
    }

    #[instrument(skip(self))]
    async fn find_proposals_for(&self, user_id: Snowflake) -> RepoResult<Vec<Course>> {
        let models = sqlx::query_as::<_, CourseModel>(&format!(
            r"
            SELECT {COURSE_COLUMNS} FROM courses
            WHERE user_b = $1 AND status = 'pending'
            ORDER BY created_at DESC
            "
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut courses = Vec::with_capacity(models.len());
        for model in models {
            courses.push(self.load_course(model).await?);
        }
        Ok(courses)
    }

    #[instrument(skip(self))]
    async fn exists_between(&self, a: Snowflake, b: Snowflake) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM courses
                WHERE ((user_a = $1 AND user_b = $2) OR (user_a = $2 AND user_b = $1))
                  AND status IN ('pending', 'active')
            )
            ",
        )
        .bind(a.into_inner())
        .bind(b.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_active_between(
        &self,
        a: Snowflake,
        b: Snowflake,
    ) -> RepoResult<Option<Course>> {
        let model = sqlx::query_as::<_, CourseModel>(&format!(
            r"
            SELECT {COURSE_COLUMNS} FROM courses
            WHERE ((user_a = $1 AND user_b = $2) OR (user_a = $2 AND user_b = $1))
              AND status = 'active'
            LIMIT 1
            "
        ))
        .bind(a.into_inner())
        .bind(b.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match model {
            Some(model) => Ok(Some(self.load_course(model).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, course))]
    async fn create(&self, course: &Course) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO courses (id, title, description, user_a, user_b, exchange, duration_weeks,
                                 user_a_skill, user_a_level, user_b_skill, user_b_level, status,
                                 proposed_by, proposed_at, accepted_at, completed_at, created_at,
                                 updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            ",
        )
        .bind(course.id.into_inner())
        .bind(&course.title)
        .bind(&course.description)
        .bind(course.user_a.into_inner())
        .bind(course.user_b.into_inner())
        .bind(course.exchange.as_str())
        .bind(course.duration_weeks)
        .bind(course.user_a_teaching.as_ref().map(|t| t.skill.clone()))
        .bind(course.user_a_teaching.as_ref().and_then(|t| t.level.clone()))
        .bind(&course.user_b_teaching.skill)
        .bind(&course.user_b_teaching.level)
        .bind(course.status.as_str())
        .bind(course.proposed_by.into_inner())
        .bind(course.proposed_at)
        .bind(course.accepted_at)
        .bind(course.completed_at)
        .bind(course.created_at)
        .bind(course.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        Self::insert_weeks(&mut tx, course.id, CourseSide::A, &course.user_a_structure).await?;
        Self::insert_weeks(&mut tx, course.id, CourseSide::B, &course.user_b_structure).await?;

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self, course))]
    async fn update(&self, course: &Course) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE courses
            SET title = $2, description = $3, status = $4, accepted_at = $5, completed_at = $6,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(course.id.into_inner())
        .bind(&course.title)
        .bind(&course.description)
        .bind(course.status.as_str())
        .bind(course.accepted_at)
        .bind(course.completed_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(course_not_found(course.id));
        }

        sqlx::query("DELETE FROM course_weeks WHERE course_id = $1")
            .bind(course.id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        Self::insert_weeks(&mut tx, course.id, CourseSide::A, &course.user_a_structure).await?;
        Self::insert_weeks(&mut tx, course.id, CourseSide::B, &course.user_b_structure).await?;

        tx.commit().await.map_err(map_db_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgCourseRepository>();
    }
}
