//! Report handlers (moderation)

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use skillswap_service::{
    CreateReportRequest, ReportResponse, ReportService, ResolveReportRequest,
};

use super::parse_id;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Optional status filter for report listings
#[derive(Debug, Deserialize)]
pub struct ReportListQuery {
    pub status: Option<String>,
}

/// File a report against another user
///
/// POST /reports
pub async fn create_report(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateReportRequest>,
) -> ApiResult<Created<Json<ReportResponse>>> {
    let service = ReportService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// List reports (admin only)
///
/// GET /reports
pub async fn list_reports(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ReportListQuery>,
) -> ApiResult<Json<Vec<ReportResponse>>> {
    let service = ReportService::new(state.service_context());
    Ok(Json(service.list(auth.user_id, query.status).await?))
}

/// Resolve or dismiss a report, optionally banning the reported user
///
/// PATCH /reports/{report_id}
pub async fn resolve_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(report_id): Path<String>,
    Json(request): Json<ResolveReportRequest>,
) -> ApiResult<Json<ReportResponse>> {
    let report_id = parse_id(&report_id, "report_id")?;
    let service = ReportService::new(state.service_context());
    Ok(Json(service.resolve(report_id, auth.user_id, request).await?))
}
