//! Report entity <-> model mapper

use skillswap_core::{DomainError, Report, ReportStatus, Snowflake};

use crate::models::ReportModel;

impl TryFrom<ReportModel> for Report {
    type Error = DomainError;

    fn try_from(model: ReportModel) -> Result<Self, Self::Error> {
        let status = ReportStatus::parse(&model.status).ok_or_else(|| {
            DomainError::InternalError(format!(
                "corrupt status '{}' on report {}",
                model.status, model.id
            ))
        })?;

        Ok(Report {
            id: Snowflake::new(model.id),
            reporter_id: Snowflake::new(model.reporter_id),
            reported_id: Snowflake::new(model.reported_id),
            reason: model.reason,
            status,
            created_at: model.created_at,
            resolved_at: model.resolved_at,
        })
    }
}
