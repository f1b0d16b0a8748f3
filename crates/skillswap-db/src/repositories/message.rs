//! PostgreSQL implementation of MessageRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use skillswap_core::{ChatMessage, Conversation, MessageRepository, RepoResult, Snowflake};

use crate::models::MessageModel;

use super::error::map_db_error;

const MESSAGE_COLUMNS: &str = "id, room_id, sender_id, receiver_id, text, read, created_at";

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self, message))]
    async fn create(&self, message: &ChatMessage) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO messages (id, room_id, sender_id, receiver_id, text, read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(message.id.into_inner())
        .bind(&message.room_id)
        .bind(message.sender_id.into_inner())
        .bind(message.receiver_id.into_inner())
        .bind(&message.text)
        .bind(message.read)
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_room(&self, room_id: &str) -> RepoResult<Vec<ChatMessage>> {
        let models = sqlx::query_as::<_, MessageModel>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE room_id = $1 ORDER BY created_at"
        ))
        .bind(room_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(ChatMessage::from).collect())
    }

    #[instrument(skip(self))]
    async fn conversations_for(&self, user_id: Snowflake) -> RepoResult<Vec<Conversation>> {
        // Latest message per room the user participates in
        let latest = sqlx::query_as::<_, MessageModel>(&format!(
            r"
            SELECT DISTINCT ON (room_id) {MESSAGE_COLUMNS}
            FROM messages
            WHERE sender_id = $1 OR receiver_id = $1
            ORDER BY room_id, created_at DESC
            "
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        // Unread counts per room, one grouped query
        let unread_rows = sqlx::query_as::<_, (String, i64)>(
            r"
            SELECT room_id, COUNT(*)
            FROM messages
            WHERE receiver_id = $1 AND NOT read
            GROUP BY room_id
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;
        let unread: HashMap<String, i64> = unread_rows.into_iter().collect();

        let mut conversations: Vec<Conversation> = latest
            .into_iter()
            .map(|model| {
                let message = ChatMessage::from(model);
                Conversation {
                    unread: unread.get(&message.room_id).copied().unwrap_or(0),
                    room_id: message.room_id.clone(),
                    last_message: message,
                }
            })
            .collect();

        conversations.sort_by(|a, b| b.last_message.created_at.cmp(&a.last_message.created_at));
        Ok(conversations)
    }

    #[instrument(skip(self))]
    async fn mark_room_read(&self, room_id: &str, reader: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query(
            "UPDATE messages SET read = TRUE WHERE room_id = $1 AND receiver_id = $2 AND NOT read",
        )
        .bind(room_id)
        .bind(reader.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgMessageRepository>();
    }
}
