//! PostgreSQL implementation of ReportRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use skillswap_core::{RepoResult, Report, ReportRepository, ReportStatus, Snowflake};

use crate::models::ReportModel;

use super::error::{map_db_error, report_not_found};

const REPORT_COLUMNS: &str =
    "id, reporter_id, reported_id, reason, status, created_at, resolved_at";

/// PostgreSQL implementation of ReportRepository
#[derive(Clone)]
pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Report>> {
        let result = sqlx::query_as::<_, ReportModel>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Report::try_from).transpose()
    }

    #[instrument(skip(self, report))]
    async fn create(&self, report: &Report) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO reports (id, reporter_id, reported_id, reason, status, created_at, resolved_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(report.id.into_inner())
        .bind(report.reporter_id.into_inner())
        .bind(report.reported_id.into_inner())
        .bind(&report.reason)
        .bind(report.status.as_str())
        .bind(report.created_at)
        .bind(report.resolved_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, status: Option<ReportStatus>) -> RepoResult<Vec<Report>> {
        let models = sqlx::query_as::<_, ReportModel>(&format!(
            r"
            SELECT {REPORT_COLUMNS} FROM reports
            WHERE ($1::TEXT IS NULL OR status = $1)
            ORDER BY created_at DESC
            "
        ))
        .bind(status.map(ReportStatus::as_str))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        models.into_iter().map(Report::try_from).collect()
    }

    #[instrument(skip(self, report))]
    async fn update(&self, report: &Report) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE reports SET status = $2, resolved_at = $3 WHERE id = $1",
        )
        .bind(report.id.into_inner())
        .bind(report.status.as_str())
        .bind(report.resolved_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(report_not_found(report.id));
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
        assert_send_sync::<PgReportRepository>();
    }
}
