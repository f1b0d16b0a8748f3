//! Rating service
//!
//! Ratings are only accepted for completed sessions in which the rater was
//! the student, and at most once per (session, student).

use skillswap_core::{AppointmentStatus, DomainError, Rating, Snowflake};
use tracing::{info, instrument};

use crate::dto::{RatingResponse, ReplyRatingRequest, SubmitRatingRequest, TeacherRatingsResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Rating service
pub struct RatingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RatingService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Submit a rating for a completed session
    #[instrument(skip(self, request))]
    pub async fn submit(
        &self,
        student_id: Snowflake,
        request: SubmitRatingRequest,
    ) -> ServiceResult<RatingResponse> {
        let session = self
            .ctx
            .appointment_repo()
            .find_by_id(request.session)
            .await?
            .ok_or_else(|| ServiceError::not_found("Session", request.session.to_string()))?;

        if session.teacher_id != request.teacher || session.student_id != student_id {
            return Err(ServiceError::not_found("Session", request.session.to_string()));
        }
        if session.status != AppointmentStatus::Completed {
            return Err(ServiceError::validation("Can only rate completed sessions"));
        }

        if self
            .ctx
            .rating_repo()
            .exists_for_session(request.session, student_id)
            .await?
        {
            return Err(DomainError::AlreadyRated.into());
        }

        self.ctx
            .user_repo()
            .find_by_id(request.teacher)
            .await?
            .ok_or(DomainError::UserNotFound(request.teacher))?;

        let rating = Rating::new(
            self.ctx.generate_id(),
            request.teacher,
            student_id,
            request.session,
            request.rating,
            request.review.unwrap_or_else(|| "No review provided.".to_string()),
        )?;

        // The unique index still backstops a concurrent duplicate.
        self.ctx.rating_repo().create(&rating).await?;

        info!(rating_id = %rating.id, teacher_id = %rating.teacher_id, "Rating submitted");
        Ok(RatingResponse::from(&rating))
    }

    /// Ratings received by a teacher, with the running average
    #[instrument(skip(self))]
    pub async fn for_teacher(
        &self,
        teacher_id: Snowflake,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<TeacherRatingsResponse> {
        let ratings = self
            .ctx
            .rating_repo()
            .find_for_teacher(teacher_id, limit, offset)
            .await?;
        let average = self.ctx.rating_repo().average_for_teacher(teacher_id).await?;

        Ok(TeacherRatingsResponse {
            ratings: ratings.iter().map(RatingResponse::from).collect(),
            average,
        })
    }

    /// Teacher reply to a rating they received
    #[instrument(skip(self, request))]
    pub async fn reply(
        &self,
        rating_id: Snowflake,
        user_id: Snowflake,
        request: ReplyRatingRequest,
    ) -> ServiceResult<RatingResponse> {
        let rating = self
            .ctx
            .rating_repo()
            .find_by_id(rating_id)
            .await?
            .ok_or(DomainError::RatingNotFound(rating_id))?;

        if rating.teacher_id != user_id {
            return Err(DomainError::NotAuthorized("only the rated teacher can reply").into());
        }

        self.ctx.rating_repo().set_reply(rating_id, &request.reply).await?;

        let mut rating = rating;
        rating.reply = Some(request.reply);
        Ok(RatingResponse::from(&rating))
    }
}
