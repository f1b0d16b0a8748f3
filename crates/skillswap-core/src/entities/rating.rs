//! Rating entity - student feedback on a completed session

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Rating entity; unique per (session, student)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rating {
    pub id: Snowflake,
    pub teacher_id: Snowflake,
    pub student_id: Snowflake,
    pub session_id: Snowflake,
    /// 1 to 5 inclusive
    pub score: i16,
    pub review: String,
    /// Optional teacher response, added after the fact
    pub reply: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Rating {
    pub fn new(
        id: Snowflake,
        teacher_id: Snowflake,
        student_id: Snowflake,
        session_id: Snowflake,
        score: i16,
        review: String,
    ) -> Result<Self, DomainError> {
        if !(1..=5).contains(&score) {
            return Err(DomainError::ValidationError(
                "Rating must be between 1 and 5".to_string(),
            ));
        }
        Ok(Self {
            id,
            teacher_id,
            student_id,
            session_id,
            score,
            review,
            reply: None,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_bounds_are_enforced() {
        for score in [0, 6, -1] {
            let result = Rating::new(
                Snowflake::new(1),
                Snowflake::new(2),
                Snowflake::new(3),
                Snowflake::new(4),
                score,
                String::new(),
            );
            assert!(result.is_err());
        }
        assert!(Rating::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            Snowflake::new(4),
            5,
            "great session".to_string(),
        )
        .is_ok());
    }
}
