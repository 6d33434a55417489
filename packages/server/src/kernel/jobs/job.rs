//! Job model for background command execution.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use typed_builder::TypedBuilder;
use uuid::Uuid;

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "job_status", rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Pending,
    Running,
    Succeeded,
    Failed,
    DeadLetter,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "job_priority", rename_all = "snake_case")]
pub enum JobPriority {
    Critical,
    High,
    #[default]
    Normal,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "error_kind", rename_all = "snake_case")]
pub enum ErrorKind {
    /// Transient error - will retry if attempts remain
    #[default]
    Retryable,
    /// Permanent error - will not retry
    NonRetryable,
    /// Job was cancelled before running
    Cancelled,
}

impl ErrorKind {
    /// Whether this error kind should trigger a retry
    pub fn should_retry(&self) -> bool {
        matches!(self, ErrorKind::Retryable)
    }
}

// ============================================================================
// Job Model
// ============================================================================

#[derive(FromRow, Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct Job {
    #[builder(default = Uuid::now_v7())]
    pub id: Uuid,

    // Core identity
    pub reference_id: Uuid,
    pub job_type: String,

    // Payload
    #[builder(default, setter(strip_option))]
    pub args: Option<serde_json::Value>,

    // Policies
    #[builder(default)]
    pub priority: JobPriority,
    #[builder(default = 3)]
    pub max_retries: i32,
    #[builder(default = 0)]
    pub retry_count: i32,
    #[builder(default = 1)]
    pub attempt: i32,

    // Lease management
    #[builder(default = 60_000)]
    pub lease_duration_ms: i64,
    #[builder(default, setter(strip_option))]
    pub lease_expires_at: Option<DateTime<Utc>>,
    #[builder(default, setter(strip_option))]
    pub worker_id: Option<String>,

    // State
    #[builder(default)]
    pub status: JobStatus,

    // Error tracking
    #[builder(default, setter(strip_option))]
    pub error_message: Option<String>,
    #[builder(default, setter(strip_option))]
    pub error_kind: Option<ErrorKind>,

    // Command-level idempotency
    #[builder(default, setter(strip_option))]
    pub idempotency_key: Option<String>,

    // Scheduling
    #[builder(default, setter(strip_option))]
    pub next_run_at: Option<DateTime<Utc>>,
    #[builder(default, setter(strip_option))]
    pub last_run_at: Option<DateTime<Utc>>,

    // Timestamps
    #[builder(default = Utc::now())]
    pub created_at: DateTime<Utc>,
    #[builder(default = Utc::now())]
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Create a job carrying a serialized command payload.
    pub fn for_command(
        job_type: &str,
        args: serde_json::Value,
        reference_id: Option<Uuid>,
        idempotency_key: Option<String>,
        priority: JobPriority,
        max_retries: i32,
        lease_duration_ms: i64,
    ) -> Self {
        let mut job = Self::builder()
            .reference_id(reference_id.unwrap_or_else(Uuid::now_v7))
            .job_type(job_type.to_string())
            .args(args)
            .priority(priority)
            .max_retries(max_retries)
            .lease_duration_ms(lease_duration_ms)
            .build();
        job.idempotency_key = idempotency_key;
        job
    }

    /// Check if the job is ready to run
    pub fn is_ready(&self) -> bool {
        if self.status != JobStatus::Pending {
            return false;
        }

        if self.retry_count >= self.max_retries {
            return false;
        }

        match self.next_run_at {
            None => true,
            Some(next_run) => next_run <= Utc::now(),
        }
    }

    /// Create a retry job from a failed job
    pub fn create_retry(&self, scheduled_for: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            reference_id: self.reference_id,
            job_type: self.job_type.clone(),
            args: self.args.clone(),
            priority: self.priority,
            max_retries: self.max_retries,
            retry_count: self.retry_count + 1,
            attempt: self.attempt + 1,
            lease_duration_ms: self.lease_duration_ms,
            lease_expires_at: None,
            worker_id: None,
            status: JobStatus::Pending,
            error_message: None,
            error_kind: None,
            idempotency_key: self.idempotency_key.clone(),
            next_run_at: Some(scheduled_for),
            last_run_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn insert(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO jobs (
                id, reference_id, job_type, args, priority, max_retries, retry_count,
                attempt, lease_duration_ms, lease_expires_at, worker_id, status,
                error_message, error_kind, idempotency_key, next_run_at, last_run_at,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING *
            "#,
        )
        .bind(self.id)
        .bind(self.reference_id)
        .bind(&self.job_type)
        .bind(&self.args)
        .bind(self.priority)
        .bind(self.max_retries)
        .bind(self.retry_count)
        .bind(self.attempt)
        .bind(self.lease_duration_ms)
        .bind(self.lease_expires_at)
        .bind(&self.worker_id)
        .bind(self.status)
        .bind(&self.error_message)
        .bind(self.error_kind)
        .bind(&self.idempotency_key)
        .bind(self.next_run_at)
        .bind(self.last_run_at)
        .bind(self.created_at)
        .bind(self.updated_at)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Claim jobs atomically using FOR UPDATE SKIP LOCKED.
    /// Also recovers stale jobs with expired leases.
    pub async fn claim_jobs(
        limit: i64,
        worker_id: &str,
        lease_duration_ms: i64,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            WITH next_jobs AS (
                SELECT id
                FROM jobs
                WHERE
                    (status = 'pending' AND (next_run_at IS NULL OR next_run_at <= NOW()) AND retry_count < max_retries)
                    OR (status = 'running' AND lease_expires_at < NOW())
                ORDER BY priority, COALESCE(next_run_at, created_at)
                LIMIT $1
                FOR UPDATE SKIP LOCKED
            )
            UPDATE jobs
            SET
                status = 'running',
                last_run_at = COALESCE(last_run_at, NOW()),
                lease_expires_at = NOW() + ($2 || ' milliseconds')::INTERVAL,
                worker_id = $3,
                updated_at = NOW()
            WHERE id IN (SELECT id FROM next_jobs)
            RETURNING *
            "#,
        )
        .bind(limit)
        .bind(lease_duration_ms.to_string())
        .bind(worker_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Extend the lease for a running job (heartbeat).
    pub async fn extend_lease(&self, pool: &PgPool) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE jobs
            SET lease_expires_at = NOW() + ($1 || ' milliseconds')::INTERVAL,
                updated_at = NOW()
            WHERE id = $2 AND status = 'running'
            "#,
        )
        .bind(self.lease_duration_ms.to_string())
        .bind(self.id)
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_job() -> Job {
        Job::builder()
            .reference_id(Uuid::new_v4())
            .job_type("test_job".to_string())
            .build()
    }

    #[test]
    fn new_job_has_default_max_retries_of_3() {
        assert_eq!(sample_job().max_retries, 3);
    }

    #[test]
    fn new_job_starts_with_pending_status() {
        assert_eq!(sample_job().status, JobStatus::Pending);
    }

    #[test]
    fn is_ready_pending_job_without_schedule() {
        assert!(sample_job().is_ready());
    }

    #[test]
    fn is_ready_running_job_is_not_ready() {
        let mut job = sample_job();
        job.status = JobStatus::Running;
        assert!(!job.is_ready());
    }

    #[test]
    fn is_ready_respects_future_schedule() {
        let mut job = sample_job();
        job.next_run_at = Some(Utc::now() + chrono::Duration::hours(1));
        assert!(!job.is_ready());
    }

    #[test]
    fn retry_increments_counters_and_reschedules() {
        let job = sample_job();
        let retry_at = Utc::now() + chrono::Duration::seconds(2);
        let retry = job.create_retry(retry_at);

        assert_ne!(retry.id, job.id);
        assert_eq!(retry.retry_count, 1);
        assert_eq!(retry.attempt, 2);
        assert_eq!(retry.status, JobStatus::Pending);
        assert_eq!(retry.next_run_at, Some(retry_at));
    }

    #[test]
    fn retryable_error_should_retry() {
        assert!(ErrorKind::Retryable.should_retry());
        assert!(!ErrorKind::NonRetryable.should_retry());
        assert!(!ErrorKind::Cancelled.should_retry());
    }
}
