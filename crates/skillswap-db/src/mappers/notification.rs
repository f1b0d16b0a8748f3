//! Notification entity <-> model mapper

use skillswap_core::{DomainError, Notification, NotificationKind, Snowflake};

use crate::models::NotificationModel;

impl TryFrom<NotificationModel> for Notification {
    type Error = DomainError;

    fn try_from(model: NotificationModel) -> Result<Self, Self::Error> {
        let kind = NotificationKind::parse(&model.kind).ok_or_else(|| {
            DomainError::InternalError(format!(
                "corrupt kind '{}' on notification {}",
                model.kind, model.id
            ))
        })?;

        Ok(Notification {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            kind,
            from_id: model.from_id.map(Snowflake::new),
            content: model.content,
            read: model.read,
            seen: model.seen,
            created_at: model.created_at,
        })
    }
}
