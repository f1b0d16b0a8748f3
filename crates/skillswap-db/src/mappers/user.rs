//! User entity <-> model mapper

use skillswap_core::{Snowflake, User, UserRole};

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            full_name: model.full_name,
            email: model.email,
            avatar: model.avatar,
            credits: model.credits,
            balance: model.balance,
            availability: model.availability.0,
            learning_skills: model.learning_skills,
            teaching_skills: model.teaching_skills,
            role: UserRole::parse(&model.role).unwrap_or_default(),
            banned: model.banned,
            email_verified: model.email_verified,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
