//! Chat message history. Append-only.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{Message, NewMessage};
use crate::validation::validate_message_content;
use crate::Result;

/// Append a message to a user's history.
///
/// The timestamp is assigned here, at insert time.
pub async fn create_message(pool: &SqlitePool, user_id: i64, message: &NewMessage) -> Result<Message> {
    validate_message_content(&message.content)?;

    let created = sqlx::query_as::<_, Message>(
        r#"
        INSERT INTO messages (content, is_user, timestamp, user_id)
        VALUES (?, ?, ?, ?)
        RETURNING id, content, is_user, timestamp, user_id
        "#,
    )
    .bind(&message.content)
    .bind(message.is_user)
    .bind(Utc::now())
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

/// List a user's messages, oldest first.
///
/// Messages with equal timestamps are ordered by ID. With a limit, the most
/// recent `limit` messages are returned, still oldest first.
pub async fn list_messages(
    pool: &SqlitePool,
    user_id: i64,
    limit: Option<i64>,
) -> Result<Vec<Message>> {
    let messages = match limit {
        Some(limit) => {
            sqlx::query_as::<_, Message>(
                r#"
                SELECT id, content, is_user, timestamp, user_id
                FROM (
                    SELECT id, content, is_user, timestamp, user_id
                    FROM messages
                    WHERE user_id = ?
                    ORDER BY timestamp DESC, id DESC
                    LIMIT ?
                )
                ORDER BY timestamp ASC, id ASC
                "#,
            )
            .bind(user_id)
            .bind(limit.max(0))
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Message>(
                r#"
                SELECT id, content, is_user, timestamp, user_id
                FROM messages
                WHERE user_id = ?
                ORDER BY timestamp ASC, id ASC
                "#,
            )
            .bind(user_id)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(messages)
}
