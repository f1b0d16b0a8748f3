//! Report service
//!
//! Moderation collaborator: reports are filed by users and resolved by
//! admins, optionally banning the reported user.

use skillswap_core::{DomainError, Report, ReportStatus, Snowflake};
use tracing::{info, instrument};

use crate::dto::{CreateReportRequest, ReportResponse, ResolveReportRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Report service
pub struct ReportService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReportService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// File a report against another user
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        reporter_id: Snowflake,
        request: CreateReportRequest,
    ) -> ServiceResult<ReportResponse> {
        if request.reported == reporter_id {
            return Err(ServiceError::validation("Cannot report yourself"));
        }

        self.ctx
            .user_repo()
            .find_by_id(request.reported)
            .await?
            .ok_or(DomainError::UserNotFound(request.reported))?;

        let report = Report::new(
            self.ctx.generate_id(),
            reporter_id,
            request.reported,
            request.reason,
        );
        self.ctx.report_repo().create(&report).await?;

        info!(report_id = %report.id, reported_id = %report.reported_id, "Report filed");
        Ok(ReportResponse::from(&report))
    }

    /// List reports, optionally filtered by status (admin only)
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        admin_id: Snowflake,
        status: Option<String>,
    ) -> ServiceResult<Vec<ReportResponse>> {
        self.require_admin(admin_id).await?;

        let status = match status.as_deref() {
            None | Some("all") => None,
            Some(s) => Some(
                ReportStatus::parse(s).ok_or_else(|| DomainError::InvalidStatus(s.to_string()))?,
            ),
        };

        let reports = self.ctx.report_repo().list(status).await?;
        Ok(reports.iter().map(ReportResponse::from).collect())
    }

    /// Resolve or dismiss a report; resolving with `ban` flips the
    /// reported user's ban flag
    #[instrument(skip(self, request))]
    pub async fn resolve(
        &self,
        id: Snowflake,
        admin_id: Snowflake,
        request: ResolveReportRequest,
    ) -> ServiceResult<ReportResponse> {
        self.require_admin(admin_id).await?;

        let mut report = self
            .ctx
            .report_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ReportNotFound(id))?;

        report.resolve(request.dismissed);
        self.ctx.report_repo().update(&report).await?;

        if request.ban && !request.dismissed {
            self.ctx.user_repo().set_banned(report.reported_id, true).await?;
            info!(user_id = %report.reported_id, report_id = %id, "User banned");
        }

        Ok(ReportResponse::from(&report))
    }

    async fn require_admin(&self, user_id: Snowflake) -> ServiceResult<()> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        if !user.is_admin() {
            return Err(DomainError::NotAuthorized("admin role required").into());
        }
        Ok(())
    }
}
