// Repository for AI chat sessions and their messages
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{ChatMessage, ChatRole, ChatSession};

#[derive(Clone)]
pub struct ChatRepository {
    pool: PgPool,
}

impl ChatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_session(&self, session_id: Uuid) -> Result<Option<ChatSession>, sqlx::Error> {
        sqlx::query_as::<_, ChatSession>(
            "SELECT id, user_id, created_at, updated_at FROM ai_chat_sessions WHERE id = $1",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn create_session(&self, user_id: Option<Uuid>) -> Result<ChatSession, sqlx::Error> {
        sqlx::query_as::<_, ChatSession>(
            r#"
            INSERT INTO ai_chat_sessions (user_id)
            VALUES ($1)
            RETURNING id, user_id, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    // Bump updated_at so session lists sort by last activity
    pub async fn touch_session(&self, session_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE ai_chat_sessions SET updated_at = NOW() WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn list_sessions(&self, user_id: Uuid, limit: i64) -> Result<Vec<ChatSession>, sqlx::Error> {
        sqlx::query_as::<_, ChatSession>(
            r#"
            SELECT id, user_id, created_at, updated_at
            FROM ai_chat_sessions
            WHERE user_id = $1
            ORDER BY updated_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn add_message(
        &self,
        session_id: Uuid,
        role: ChatRole,
        content: &str,
    ) -> Result<ChatMessage, sqlx::Error> {
        sqlx::query_as::<_, ChatMessage>(
            r#"
            INSERT INTO ai_chat_messages (session_id, role, content)
            VALUES ($1, $2, $3)
            RETURNING id, session_id, role, content, created_at
            "#,
        )
        .bind(session_id)
        .bind(role.as_str())
        .bind(content)
        .fetch_one(&self.pool)
        .await
    }

    /// Latest `limit` messages of a session, returned oldest first
    pub async fn recent_messages(&self, session_id: Uuid, limit: i64) -> Result<Vec<ChatMessage>, sqlx::Error> {
        sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT id, session_id, role, content, created_at FROM (
                SELECT id, session_id, role, content, created_at
                FROM ai_chat_messages
                WHERE session_id = $1
                ORDER BY created_at DESC, id DESC
                LIMIT $2
            ) recent
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(session_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    // Paged transcript in chronological order
    pub async fn list_messages(
        &self,
        session_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ChatMessage>, sqlx::Error> {
        sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT id, session_id, role, content, created_at
            FROM ai_chat_messages
            WHERE session_id = $1
            ORDER BY created_at ASC, id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(session_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }
}
