//! Course handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use skillswap_core::CourseSide;
use skillswap_service::{
    AvailabilityResponse, CompleteWeekResponse, CourseResponse, CourseService,
    CourseStatsResponse, ProposeCourseRequest, UpdateCourseWeekRequest,
};

use super::parse_id;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// Optional status filter for course listings
#[derive(Debug, Deserialize)]
pub struct CourseListQuery {
    pub status: Option<String>,
}

fn parse_side(raw: &str) -> Result<CourseSide, ApiError> {
    CourseSide::parse(raw).ok_or_else(|| ApiError::invalid_path("Invalid structure side"))
}

/// Propose a course to another user
///
/// POST /courses
pub async fn propose_course(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ProposeCourseRequest>,
) -> ApiResult<Created<Json<CourseResponse>>> {
    let service = CourseService::new(state.service_context());
    let response = service.propose(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// List the current user's courses
///
/// GET /courses
pub async fn get_my_courses(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<CourseListQuery>,
) -> ApiResult<Json<Vec<CourseResponse>>> {
    let service = CourseService::new(state.service_context());
    Ok(Json(service.my_courses(auth.user_id, query.status).await?))
}

/// Pending proposals addressed to the current user
///
/// GET /courses/proposals
pub async fn get_course_proposals(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<CourseResponse>>> {
    let service = CourseService::new(state.service_context());
    Ok(Json(service.proposals(auth.user_id).await?))
}

/// Detailed course view (participants only)
///
/// GET /courses/{course_id}
pub async fn get_course(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<String>,
) -> ApiResult<Json<CourseResponse>> {
    let course_id = parse_id(&course_id, "course_id")?;
    let service = CourseService::new(state.service_context());
    Ok(Json(service.details(course_id, auth.user_id).await?))
}

/// Accept a pending proposal
///
/// POST /courses/{course_id}/accept
pub async fn accept_course(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<String>,
) -> ApiResult<Json<CourseResponse>> {
    let course_id = parse_id(&course_id, "course_id")?;
    let service = CourseService::new(state.service_context());
    Ok(Json(service.accept(course_id, auth.user_id).await?))
}

/// Reject a pending proposal
///
/// POST /courses/{course_id}/reject
pub async fn reject_course(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<String>,
) -> ApiResult<Json<CourseResponse>> {
    let course_id = parse_id(&course_id, "course_id")?;
    let service = CourseService::new(state.service_context());
    Ok(Json(service.reject(course_id, auth.user_id).await?))
}

/// Cancel a pending or active course
///
/// POST /courses/{course_id}/cancel
pub async fn cancel_course(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<String>,
) -> ApiResult<Json<CourseResponse>> {
    let course_id = parse_id(&course_id, "course_id")?;
    let service = CourseService::new(state.service_context());
    Ok(Json(service.cancel(course_id, auth.user_id).await?))
}

/// Update a week's title/description
///
/// PATCH /courses/{course_id}/weeks/{week}/{side}
pub async fn update_course_week(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((course_id, week, side)): Path<(String, i32, String)>,
    ValidatedJson(request): ValidatedJson<UpdateCourseWeekRequest>,
) -> ApiResult<Json<CompleteWeekResponse>> {
    let course_id = parse_id(&course_id, "course_id")?;
    let side = parse_side(&side)?;
    let service = CourseService::new(state.service_context());
    Ok(Json(
        service.update_week(course_id, auth.user_id, side, week, request).await?,
    ))
}

/// Mark a week completed and recompute progress
///
/// PATCH /courses/{course_id}/weeks/{week}/{side}/complete
pub async fn complete_course_week(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((course_id, week, side)): Path<(String, i32, String)>,
) -> ApiResult<Json<CompleteWeekResponse>> {
    let course_id = parse_id(&course_id, "course_id")?;
    let side = parse_side(&side)?;
    let service = CourseService::new(state.service_context());
    Ok(Json(
        service.complete_week(course_id, auth.user_id, side, week).await?,
    ))
}

/// Course statistics (participants only)
///
/// GET /courses/{course_id}/stats
pub async fn get_course_stats(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<String>,
) -> ApiResult<Json<CourseStatsResponse>> {
    let course_id = parse_id(&course_id, "course_id")?;
    let service = CourseService::new(state.service_context());
    Ok(Json(service.stats(course_id, auth.user_id).await?))
}

/// Availability of a user sharing an active course with the requester
///
/// GET /courses/availability/{user_id}
pub async fn get_counterpart_availability(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
) -> ApiResult<Json<AvailabilityResponse>> {
    let user_id = parse_id(&user_id, "user_id")?;
    let service = CourseService::new(state.service_context());
    Ok(Json(service.counterpart_availability(auth.user_id, user_id).await?))
}
