//! Chat history operations.

use serde::Serialize;
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{Chat, ChatSummary};

/// Store `messages` under `id`, replacing any previous history.
///
/// Concurrent writes to the same id are last-write-wins.
pub async fn save_chat<T: Serialize + ?Sized>(pool: &SqlitePool, id: &str, messages: &T) -> Result<()> {
    let json = serde_json::to_string(messages)?;

    sqlx::query(
        r#"
        INSERT INTO chats (id, messages)
        VALUES (?, ?)
        ON CONFLICT(id) DO UPDATE SET
            messages = excluded.messages,
            updated_at = strftime('%Y-%m-%d %H:%M:%f', 'now')
        "#,
    )
    .bind(id)
    .bind(&json)
    .execute(pool)
    .await?;

    tracing::debug!("Saved chat {} ({} bytes)", id, json.len());
    Ok(())
}

/// Get a chat by ID.
pub async fn get_chat(pool: &SqlitePool, id: &str) -> Result<Chat> {
    sqlx::query_as::<_, Chat>(
        r#"
        SELECT id, messages, created_at, updated_at
        FROM chats
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Chat",
        id: id.to_string(),
    })
}

/// List chats, most recently written first.
pub async fn list_chats(pool: &SqlitePool) -> Result<Vec<ChatSummary>> {
    let chats = sqlx::query_as::<_, ChatSummary>(
        r#"
        SELECT id, created_at, updated_at, json_array_length(messages) AS message_count
        FROM chats
        ORDER BY updated_at DESC, id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(chats)
}

/// Delete a chat.
pub async fn delete_chat(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM chats WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Chat",
            id: id.to_string(),
        });
    }

    Ok(())
}
