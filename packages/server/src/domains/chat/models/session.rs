use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{MessageId, ProjectId, SessionId, UserId};

/// Message author tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "chat_sender", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

/// A chat session, keyed one-to-one with a project.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChatSession {
    pub id: SessionId,
    pub project_id: ProjectId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// One message in a session. Append-only; never edited or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChatMessage {
    pub id: MessageId,
    pub session_id: SessionId,
    pub sender: Sender,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl ChatSession {
    /// Fetch the session for a project, creating it on first message.
    /// Concurrency-safe like profile creation: one row per project.
    pub async fn get_or_create(project_id: ProjectId, user_id: UserId, pool: &PgPool) -> Result<Self> {
        sqlx::query(
            "INSERT INTO chat_sessions (project_id, user_id) VALUES ($1, $2) ON CONFLICT (project_id) DO NOTHING",
        )
        .bind(project_id)
        .bind(user_id)
        .execute(pool)
        .await?;

        sqlx::query_as::<_, Self>("SELECT * FROM chat_sessions WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_id(id: SessionId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM chat_sessions WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// Find the session for a project, scoped to its owner.
    pub async fn find_for_project(
        project_id: ProjectId,
        user_id: UserId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM chat_sessions WHERE project_id = $1 AND user_id = $2",
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }
}

impl ChatMessage {
    /// Append a message to a session.
    pub async fn append(
        session_id: SessionId,
        sender: Sender,
        body: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO chat_messages (session_id, sender, body)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(session_id)
        .bind(sender)
        .bind(body)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// All messages for a session, oldest first.
    pub async fn list_for_session(session_id: SessionId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM chat_messages WHERE session_id = $1 ORDER BY created_at ASC",
        )
        .bind(session_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
