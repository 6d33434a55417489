use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{ProjectId, UserId};

/// One uploaded document.
///
/// `storage_key` is immutable after creation; replacing the file is a
/// storage-level overwrite of the same key, never a key change.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: ProjectId,
    pub user_id: UserId,
    pub title: String,
    pub original_file_name: Option<String>,
    pub storage_key: String,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub async fn create(
        user_id: UserId,
        title: &str,
        original_file_name: Option<&str>,
        storage_key: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO projects (user_id, title, original_file_name, storage_key)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(original_file_name)
        .bind(storage_key)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: ProjectId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// Find a project scoped to its owner. Foreign projects are invisible,
    /// not forbidden.
    pub async fn find_for_user(id: ProjectId, user_id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM projects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn list_for_user(user_id: UserId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM projects WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete the row. Dependent content rows and chat data go with it via
    /// FK cascade; blob cleanup is the caller's (best-effort) concern.
    pub async fn delete(id: ProjectId, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
