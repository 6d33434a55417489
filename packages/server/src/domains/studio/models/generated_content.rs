use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::{ContentId, ProjectId, UserId};

/// The closed set of derivative artifact kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "content_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    SlideDeck,
    FlashcardSet,
    McqSet,
    Podcast,
}

/// Lifecycle status of one generation request.
///
/// `Success` and `Failure` are terminal; only a new request moves the row
/// again (back to `Pending`, in place).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "content_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    Pending,
    Success,
    Failure,
}

/// One derivative artifact tied to a project.
///
/// At most one row exists per (project, kind): re-requesting a kind
/// replaces the row's status/URL in place rather than inserting a second
/// row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GeneratedContent {
    pub id: ContentId,
    pub project_id: ProjectId,
    pub kind: ContentKind,
    pub status: ContentStatus,
    pub output_url: Option<String>,
    pub job_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GeneratedContent {
    /// Create or reset the row for (project, kind) to `pending` with a
    /// cleared URL. The prior artifact is not deleted here — that happens
    /// inside the job, keeping the synchronous path free of storage I/O.
    pub async fn upsert_pending(project_id: ProjectId, kind: ContentKind, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO generated_contents (project_id, kind, status, output_url)
            VALUES ($1, $2, 'pending', NULL)
            ON CONFLICT (project_id, kind) DO UPDATE
            SET status = 'pending',
                output_url = NULL,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(project_id)
        .bind(kind)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Record the queue job driving this row.
    pub async fn set_job(id: ContentId, job_id: Uuid, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE generated_contents SET job_id = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(job_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Terminal update: success with the artifact URL, in one write.
    pub async fn mark_succeeded(id: ContentId, url: &str, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE generated_contents
            SET status = 'success', output_url = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(url)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Terminal update: failure, URL left as-is.
    pub async fn mark_failed(id: ContentId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE generated_contents
            SET status = 'failure', updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: ContentId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM generated_contents WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// Find a content row scoped to the owning user.
    pub async fn find_for_user(id: ContentId, user_id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT gc.*
            FROM generated_contents gc
            INNER JOIN projects p ON p.id = gc.project_id
            WHERE gc.id = $1 AND p.user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn list_for_project(project_id: ProjectId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM generated_contents WHERE project_id = $1 ORDER BY created_at ASC",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
