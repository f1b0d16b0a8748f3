//! Rating entity <-> model mapper

use skillswap_core::{Rating, Snowflake};

use crate::models::RatingModel;

impl From<RatingModel> for Rating {
    fn from(model: RatingModel) -> Self {
        Rating {
            id: Snowflake::new(model.id),
            teacher_id: Snowflake::new(model.teacher_id),
            student_id: Snowflake::new(model.student_id),
            session_id: Snowflake::new(model.session_id),
            score: model.score,
            review: model.review,
            reply: model.reply,
            created_at: model.created_at,
        }
    }
}
