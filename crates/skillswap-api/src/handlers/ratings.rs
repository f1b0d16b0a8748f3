//! Rating handlers

use axum::{
    extract::{Path, State},
    Json,
};
use skillswap_service::{
    RatingResponse, RatingService, ReplyRatingRequest, SubmitRatingRequest,
    TeacherRatingsResponse,
};

use super::parse_id;
use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Rate a completed session; the logged-in user is the student
///
/// POST /ratings
pub async fn submit_rating(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<SubmitRatingRequest>,
) -> ApiResult<Created<Json<RatingResponse>>> {
    let service = RatingService::new(state.service_context());
    let response = service.submit(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Ratings received by a teacher, with the average
///
/// GET /ratings/teacher/{teacher_id}
pub async fn get_teacher_ratings(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(teacher_id): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<TeacherRatingsResponse>> {
    let teacher_id = parse_id(&teacher_id, "teacher_id")?;
    let service = RatingService::new(state.service_context());
    Ok(Json(
        service.for_teacher(teacher_id, pagination.limit, pagination.offset).await?,
    ))
}

/// Teacher reply to a rating
///
/// POST /ratings/{rating_id}/reply
pub async fn reply_to_rating(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(rating_id): Path<String>,
    ValidatedJson(request): ValidatedJson<ReplyRatingRequest>,
) -> ApiResult<Json<RatingResponse>> {
    let rating_id = parse_id(&rating_id, "rating_id")?;
    let service = RatingService::new(state.service_context());
    Ok(Json(service.reply(rating_id, auth.user_id, request).await?))
}
