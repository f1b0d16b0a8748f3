//! Course service
//!
//! Proposal lifecycle and the weekly-progress tracker. Structures are
//! built by the entity factory at proposal time; progress is derived on
//! every read and never written back as truth.

use skillswap_core::{
    Course, CourseSide, CourseStatus, DomainError, Snowflake, TeachingSkill,
};
use tracing::{info, instrument};

use crate::dto::{
    AvailabilityResponse, CompleteWeekResponse, CourseResponse, CourseStatsResponse,
    ProposeCourseRequest, UpdateCourseWeekRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Course service
pub struct CourseService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CourseService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Propose a course to another user. The proposer is user A.
    #[instrument(skip(self, request))]
    pub async fn propose(
        &self,
        user_a: Snowflake,
        request: ProposeCourseRequest,
    ) -> ServiceResult<CourseResponse> {
        if request.user_b == user_a {
            return Err(ServiceError::validation("Cannot propose a course to yourself"));
        }

        self.ctx
            .user_repo()
            .find_by_id(request.user_b)
            .await?
            .ok_or(DomainError::UserNotFound(request.user_b))?;

        if self.ctx.course_repo().exists_between(user_a, request.user_b).await? {
            return Err(DomainError::CourseAlreadyExists.into());
        }

        let user_a_teaching = if request.just_want_to_learn {
            None
        } else {
            match request.user_a_teaching_skill {
                Some(skill) if !skill.trim().is_empty() => Some(TeachingSkill::new(skill)),
                _ => {
                    return Err(ServiceError::validation(
                        "For a mutual exchange, select what you will teach or check 'I just want to learn'",
                    ))
                }
            }
        };

        let course = Course::new_proposal(
            self.ctx.generate_id(),
            request.title,
            request.description,
            user_a,
            request.user_b,
            request.duration_weeks,
            user_a_teaching,
            TeachingSkill::new(request.user_b_teaching_skill),
        );

        self.ctx.course_repo().create(&course).await?;

        info!(course_id = %course.id, user_a = %user_a, user_b = %course.user_b, "Course proposed");
        Ok(CourseResponse::from(&course))
    }

    /// Pending proposals addressed to the user
    #[instrument(skip(self))]
    pub async fn proposals(&self, user_id: Snowflake) -> ServiceResult<Vec<CourseResponse>> {
        let courses = self.ctx.course_repo().find_proposals_for(user_id).await?;
        Ok(courses.iter().map(CourseResponse::from).collect())
    }

    /// Courses the user participates in, optionally filtered by status
    #[instrument(skip(self))]
    pub async fn my_courses(
        &self,
        user_id: Snowflake,
        status: Option<String>,
    ) -> ServiceResult<Vec<CourseResponse>> {
        let status = match status.as_deref() {
            None | Some("all") => None,
            Some(s) => Some(
                CourseStatus::parse(s).ok_or_else(|| DomainError::InvalidStatus(s.to_string()))?,
            ),
        };
        let courses = self.ctx.course_repo().find_for_user(user_id, status).await?;
        Ok(courses.iter().map(CourseResponse::from).collect())
    }

    /// Detailed course view, participants only
    #[instrument(skip(self))]
    pub async fn details(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<CourseResponse> {
        let course = self.participant_course(id, user_id).await?;
        Ok(CourseResponse::from(&course))
    }

    /// Accept a pending proposal (addressee only)
    #[instrument(skip(self))]
    pub async fn accept(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<CourseResponse> {
        let mut course = self.load(id).await?;

        if course.user_b != user_id {
            return Err(DomainError::NotAuthorized("only the invited user can accept").into());
        }
        if course.status != CourseStatus::Pending {
            return Err(DomainError::CourseNotPending.into());
        }

        course.status = CourseStatus::Active;
        course.accepted_at = Some(chrono::Utc::now());
        self.ctx.course_repo().update(&course).await?;

        info!(course_id = %id, "Course proposal accepted");
        Ok(CourseResponse::from(&course))
    }

    /// Reject a pending proposal (addressee only)
    #[instrument(skip(self))]
    pub async fn reject(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<CourseResponse> {
        let mut course = self.load(id).await?;

        if course.user_b != user_id {
            return Err(DomainError::NotAuthorized("only the invited user can reject").into());
        }
        if course.status != CourseStatus::Pending {
            return Err(DomainError::CourseNotPending.into());
        }

        course.status = CourseStatus::Rejected;
        self.ctx.course_repo().update(&course).await?;

        info!(course_id = %id, "Course proposal rejected");
        Ok(CourseResponse::from(&course))
    }

    /// Cancel a pending or active course (either participant)
    #[instrument(skip(self))]
    pub async fn cancel(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<CourseResponse> {
        let mut course = self.participant_course(id, user_id).await?;

        if !matches!(course.status, CourseStatus::Pending | CourseStatus::Active) {
            return Err(DomainError::CourseNotCancelable.into());
        }

        course.status = CourseStatus::Cancelled;
        self.ctx.course_repo().update(&course).await?;

        info!(course_id = %id, "Course cancelled");
        Ok(CourseResponse::from(&course))
    }

    /// Update a week's title/description. Only the owner of the structure
    /// side may edit it.
    #[instrument(skip(self, request))]
    pub async fn update_week(
        &self,
        id: Snowflake,
        user_id: Snowflake,
        side: CourseSide,
        week_number: i32,
        request: UpdateCourseWeekRequest,
    ) -> ServiceResult<CompleteWeekResponse> {
        let mut course = self.load(id).await?;

        if course.side_owner(side) != user_id {
            return Err(DomainError::NotAuthorized("not the owner of this structure").into());
        }

        let structure = match side {
            CourseSide::A => &mut course.user_a_structure,
            CourseSide::B => &mut course.user_b_structure,
        };
        let max = structure.len() as i32;
        if week_number < 1 || week_number > max {
            return Err(DomainError::InvalidWeek { week: week_number, max }.into());
        }

        let week = &mut structure[(week_number - 1) as usize];
        if let Some(title) = request.title {
            week.title = title;
        }
        if let Some(description) = request.description {
            week.description = description;
        }
        let week = week.clone();

        self.ctx.course_repo().update(&course).await?;

        Ok(CompleteWeekResponse {
            week,
            progress: course.progress(),
            status: course.status.as_str().to_string(),
        })
    }

    /// Mark a week completed, recompute progress, and flip the course to
    /// completed when every required structure is done.
    #[instrument(skip(self))]
    pub async fn complete_week(
        &self,
        id: Snowflake,
        user_id: Snowflake,
        side: CourseSide,
        week_number: i32,
    ) -> ServiceResult<CompleteWeekResponse> {
        let mut course = self.load(id).await?;

        if course.side_owner(side) != user_id {
            return Err(DomainError::NotAuthorized("not the owner of this structure").into());
        }

        let week = course.complete_week(side, week_number)?.clone();
        course.try_complete();

        self.ctx.course_repo().update(&course).await?;

        info!(
            course_id = %id,
            week = week_number,
            side = side.as_str(),
            progress = ?course.progress(),
            "Course week completed"
        );

        Ok(CompleteWeekResponse {
            week,
            progress: course.progress(),
            status: course.status.as_str().to_string(),
        })
    }

    /// Aggregate statistics, participants only
    #[instrument(skip(self))]
    pub async fn stats(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<CourseStatsResponse> {
        let course = self.participant_course(id, user_id).await?;
        Ok(CourseStatsResponse::from(&course))
    }

    /// Weekly availability of a user the requester shares an active
    /// course with (for scheduling course sessions)
    #[instrument(skip(self))]
    pub async fn counterpart_availability(
        &self,
        requester: Snowflake,
        other: Snowflake,
    ) -> ServiceResult<AvailabilityResponse> {
        self.ctx
            .course_repo()
            .find_active_between(requester, other)
            .await?
            .ok_or_else(|| ServiceError::not_found("Active course with user", other.to_string()))?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(other)
            .await?
            .ok_or(DomainError::UserNotFound(other))?;

        Ok(AvailabilityResponse {
            user_id: user.id,
            full_name: user.full_name,
            availability: user.availability,
        })
    }

    async fn load(&self, id: Snowflake) -> ServiceResult<Course> {
        Ok(self
            .ctx
            .course_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::CourseNotFound(id))?)
    }

    async fn participant_course(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<Course> {
        let course = self.load(id).await?;
        if !course.is_participant(user_id) {
            return Err(DomainError::NotAuthorized("not a participant of this course").into());
        }
        Ok(course)
    }
}
