//! Course entity <-> model mapper

use skillswap_core::{
    Course, CourseStatus, CourseWeek, DomainError, ExchangeType, Snowflake, TeachingSkill,
};

use crate::models::{CourseModel, CourseWeekModel};

/// Assemble a course entity from its row and week rows.
///
/// Week rows must be pre-sorted by (side, week); the repository query
/// guarantees this.
pub fn assemble_course(
    model: CourseModel,
    weeks: Vec<CourseWeekModel>,
) -> Result<Course, DomainError> {
    let exchange = ExchangeType::parse(&model.exchange).ok_or_else(|| {
        DomainError::InternalError(format!(
            "corrupt exchange '{}' on course {}",
            model.exchange, model.id
        ))
    })?;
    let status = CourseStatus::parse(&model.status).ok_or_else(|| {
        DomainError::InternalError(format!(
            "corrupt status '{}' on course {}",
            model.status, model.id
        ))
    })?;

    let mut user_a_structure = Vec::new();
    let mut user_b_structure = Vec::new();
    for week in weeks {
        let entry = CourseWeek {
            week: week.week,
            title: week.title,
            description: week.description,
            content: week.content.0,
            completed: week.completed,
        };
        match week.side.as_str() {
            "a" => user_a_structure.push(entry),
            _ => user_b_structure.push(entry),
        }
    }

    Ok(Course {
        id: Snowflake::new(model.id),
        title: model.title,
        description: model.description,
        user_a: Snowflake::new(model.user_a),
        user_b: Snowflake::new(model.user_b),
        exchange,
        duration_weeks: model.duration_weeks,
        user_a_teaching: model.user_a_skill.map(|skill| TeachingSkill {
            skill,
            level: model.user_a_level,
        }),
        user_b_teaching: TeachingSkill {
            skill: model.user_b_skill,
            level: model.user_b_level,
        },
        user_a_structure,
        user_b_structure,
        status,
        proposed_by: Snowflake::new(model.proposed_by),
        proposed_at: model.proposed_at,
        accepted_at: model.accepted_at,
        completed_at: model.completed_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
