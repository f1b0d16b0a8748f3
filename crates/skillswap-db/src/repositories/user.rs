//! PostgreSQL implementation of UserRepository
//!
//! Credit and balance mutations are single guarded UPDATE statements, so
//! concurrent same-user operations serialize on the row without
//! application-level locking.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;

use skillswap_core::{DomainError, RepoResult, Snowflake, User, UserRepository};

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation, user_not_found};

const USER_COLUMNS: &str = "id, full_name, email, password_hash, avatar, credits, balance, \
                            availability, learning_skills, teaching_skills, role, banned, \
                            email_verified, verification_code, created_at, updated_at";

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, user, password_hash))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO users (id, full_name, email, password_hash, avatar, credits, balance,
                               availability, learning_skills, teaching_skills, role, banned,
                               email_verified, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(password_hash)
        .bind(&user.avatar)
        .bind(user.credits)
        .bind(user.balance)
        .bind(Json(&user.availability))
        .bind(&user.learning_skills)
        .bind(&user.teaching_skills)
        .bind(user.role.as_str())
        .bind(user.banned)
        .bind(user.email_verified)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self, user))]
    async fn update(&self, user: &User) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET full_name = $2, avatar = $3, availability = $4,
                learning_skills = $5, teaching_skills = $6, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.full_name)
        .bind(&user.avatar)
        .bind(Json(&user.availability))
        .bind(&user.learning_skills)
        .bind(&user.teaching_skills)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(user.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        // Account deletion cascades to appointments; everything else keeps
        // its soft link to the vanished user.
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("DELETE FROM appointments WHERE teacher_id = $1 OR student_id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = $1")
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn adjust_credits(&self, id: Snowflake, delta: i32) -> RepoResult<i32> {
        // The guard and the update share one statement: a concurrent
        // decrement cannot observe a stale balance.
        let result = sqlx::query_scalar::<_, i32>(
            r"
            UPDATE users
            SET credits = credits + $2, updated_at = NOW()
            WHERE id = $1 AND credits + $2 >= 0
            RETURNING credits
            ",
        )
        .bind(id.into_inner())
        .bind(delta)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match result {
            Some(credits) => Ok(credits),
            None => {
                if self.find_by_id(id).await?.is_some() {
                    Err(DomainError::InsufficientCredit)
                } else {
                    Err(user_not_found(id))
                }
            }
        }
    }

    #[instrument(skip(self))]
    async fn purchase_credits(&self, id: Snowflake, amount: i64) -> RepoResult<(i64, i32)> {
        let result = sqlx::query_as::<_, (i64, i32)>(
            r"
            UPDATE users
            SET balance = balance - $2, credits = credits + $2::INT, updated_at = NOW()
            WHERE id = $1 AND balance >= $2
            RETURNING balance, credits
            ",
        )
        .bind(id.into_inner())
        .bind(amount)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match result {
            Some(updated) => Ok(updated),
            None => {
                if self.find_by_id(id).await?.is_some() {
                    Err(DomainError::InsufficientFunds)
                } else {
                    Err(user_not_found(id))
                }
            }
        }
    }

    #[instrument(skip(self))]
    async fn set_banned(&self, id: Snowflake, banned: bool) -> RepoResult<()> {
        let result = sqlx::query("UPDATE users SET banned = $2, updated_at = NOW() WHERE id = $1")
            .bind(id.into_inner())
            .bind(banned)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }
        Ok(())
    }

    #[instrument(skip(self, code))]
    async fn set_verification_code(&self, id: Snowflake, code: &str) -> RepoResult<()> {
        let result =
            sqlx::query("UPDATE users SET verification_code = $2, updated_at = NOW() WHERE id = $1")
                .bind(id.into_inner())
                .bind(code)
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }
        Ok(())
    }

    #[instrument(skip(self, code))]
    async fn verify_email(&self, email: &str, code: &str) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET email_verified = TRUE, verification_code = NULL, updated_at = NOW()
            WHERE email = $1 AND verification_code = $2
            ",
        )
        .bind(email)
        .bind(code)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgUserRepository>();
    }
}
