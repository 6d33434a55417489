//! PostgreSQL-backed job queue implementation.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::job::{ErrorKind, Job, JobPriority};

/// Result type for enqueue operations that handles idempotency.
#[derive(Debug, Clone)]
pub enum EnqueueResult {
    /// Command was enqueued, returns new job ID
    Created(Uuid),
    /// Command already exists (idempotency hit), returns existing job ID
    Duplicate(Uuid),
}

impl EnqueueResult {
    /// Get the job ID regardless of whether it was created or duplicate
    pub fn job_id(&self) -> Uuid {
        match self {
            EnqueueResult::Created(id) | EnqueueResult::Duplicate(id) => *id,
        }
    }

    /// Returns true if this was a newly created job
    pub fn is_created(&self) -> bool {
        matches!(self, EnqueueResult::Created(_))
    }
}

/// A claimed job ready for execution.
#[derive(Debug)]
pub struct ClaimedJob {
    /// The job ID
    pub id: Uuid,
    /// The raw job record
    pub job: Job,
}

impl ClaimedJob {
    /// Deserialize the command payload.
    pub fn deserialize<C: DeserializeOwned>(&self) -> Result<C> {
        let args = self
            .job
            .args
            .as_ref()
            .ok_or_else(|| anyhow!("job {} has no args", self.id))?;
        serde_json::from_value(args.clone())
            .map_err(|e| anyhow!("failed to deserialize command: {}", e))
    }

    /// Get the command type (job_type)
    pub fn command_type(&self) -> &str {
        &self.job.job_type
    }
}

/// Metadata for command serialization.
///
/// Commands implement this to name their job type and tune queue policy.
pub trait CommandMeta {
    /// The command type name (used as job_type).
    fn command_type(&self) -> &'static str;

    /// Optional idempotency key.
    ///
    /// If provided, ensures only one pending/running job exists with this key.
    fn idempotency_key(&self) -> Option<String> {
        None
    }

    /// Optional priority override.
    fn priority(&self) -> JobPriority {
        JobPriority::Normal
    }

    /// Optional reference ID for the job (the entity it operates on).
    fn reference_id(&self) -> Option<Uuid> {
        None
    }

    /// Maximum retries for this command.
    fn max_retries(&self) -> i32 {
        3
    }
}

/// Fully-resolved enqueue parameters.
#[derive(Debug, Clone)]
pub struct JobSpec {
    pub job_type: String,
    pub args: serde_json::Value,
    pub reference_id: Option<Uuid>,
    pub idempotency_key: Option<String>,
    pub priority: JobPriority,
    pub max_retries: i32,
}

/// Trait for job queue operations.
///
/// Object-safe so it can live in `ServerDeps` as a trait object; the
/// typed surface is [`JobQueueExt::enqueue`].
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Enqueue a resolved job spec for immediate execution.
    async fn enqueue_spec(&self, spec: JobSpec) -> Result<EnqueueResult>;

    /// Claim up to `limit` jobs for processing.
    ///
    /// Uses `FOR UPDATE SKIP LOCKED` for concurrent-safe claiming.
    async fn claim(&self, worker_id: &str, limit: i64) -> Result<Vec<ClaimedJob>>;

    /// Mark a job as successfully completed.
    async fn mark_succeeded(&self, job_id: Uuid) -> Result<()>;

    /// Mark a job as failed with an error.
    ///
    /// If retries remain, a retry run is scheduled with backoff.
    /// Otherwise the job is moved to dead letter.
    async fn mark_failed(&self, job_id: Uuid, error: &str, kind: ErrorKind) -> Result<()>;

    /// Cancel a pending job. Running jobs cannot be cancelled.
    async fn cancel(&self, job_id: Uuid) -> Result<bool>;

    /// Extend the lease for a running job (heartbeat).
    async fn heartbeat(&self, job_id: Uuid) -> Result<()>;
}

/// Typed enqueue on top of the object-safe [`JobQueue`].
#[async_trait]
pub trait JobQueueExt: JobQueue {
    /// Serialize and enqueue a command.
    async fn enqueue<C>(&self, command: C) -> Result<EnqueueResult>
    where
        C: Serialize + CommandMeta + Send + Sync,
    {
        let spec = JobSpec {
            job_type: command.command_type().to_string(),
            args: serde_json::to_value(&command)?,
            reference_id: command.reference_id(),
            idempotency_key: command.idempotency_key(),
            priority: command.priority(),
            max_retries: command.max_retries(),
        };
        self.enqueue_spec(spec).await
    }
}

impl<T: JobQueue + ?Sized> JobQueueExt for T {}

/// PostgreSQL-backed job queue implementation.
pub struct PostgresJobQueue {
    pool: PgPool,
    default_lease_ms: i64,
}

impl PostgresJobQueue {
    /// Create a new PostgreSQL job queue.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            default_lease_ms: 60_000,
        }
    }

    /// Create with a custom lease duration.
    pub fn with_lease_duration(pool: PgPool, lease_ms: i64) -> Self {
        Self {
            pool,
            default_lease_ms: lease_ms,
        }
    }

    /// Check if a live job with the given idempotency key already exists.
    pub async fn find_by_idempotency_key(&self, key: &str) -> Result<Option<Job>> {
        sqlx::query_as::<_, Job>(
            r#"
            SELECT * FROM jobs
            WHERE idempotency_key = $1
              AND status IN ('pending', 'running')
            LIMIT 1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(Into::into)
    }
}

#[async_trait]
impl JobQueue for PostgresJobQueue {
    async fn enqueue_spec(&self, spec: JobSpec) -> Result<EnqueueResult> {
        if let Some(key) = &spec.idempotency_key {
            if let Some(existing) = self.find_by_idempotency_key(key).await? {
                return Ok(EnqueueResult::Duplicate(existing.id));
            }
        }

        let job = Job::for_command(
            &spec.job_type,
            spec.args,
            spec.reference_id,
            spec.idempotency_key,
            spec.priority,
            spec.max_retries,
            self.default_lease_ms,
        );

        let inserted = job.insert(&self.pool).await?;

        Ok(EnqueueResult::Created(inserted.id))
    }

    async fn claim(&self, worker_id: &str, limit: i64) -> Result<Vec<ClaimedJob>> {
        let jobs = Job::claim_jobs(limit, worker_id, self.default_lease_ms, &self.pool).await?;

        Ok(jobs
            .into_iter()
            .map(|job| ClaimedJob { id: job.id, job })
            .collect())
    }

    async fn mark_succeeded(&self, job_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE jobs
            SET status = 'succeeded',
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(job_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn mark_failed(&self, job_id: Uuid, error: &str, kind: ErrorKind) -> Result<()> {
        let job = Job::find_by_id(job_id, &self.pool).await?;

        if kind.should_retry() && job.retry_count < job.max_retries {
            // Exponential backoff, capped at one hour
            let delay_secs = 2i64.pow(job.retry_count as u32).min(3600);
            let retry_at = Utc::now() + chrono::Duration::seconds(delay_secs);

            let retry_job = job.create_retry(retry_at);
            retry_job.insert(&self.pool).await?;

            info!(
                job_id = %job_id,
                retry_job_id = %retry_job.id,
                retry_at = %retry_at,
                "scheduled retry for failed job"
            );

            sqlx::query(
                r#"
                UPDATE jobs
                SET status = 'failed',
                    error_message = $1,
                    error_kind = $2,
                    updated_at = NOW()
                WHERE id = $3
                "#,
            )
            .bind(error)
            .bind(kind)
            .bind(job_id)
            .execute(&self.pool)
            .await?;
        } else {
            sqlx::query(
                r#"
                UPDATE jobs
                SET status = 'dead_letter',
                    error_message = $1,
                    error_kind = $2,
                    updated_at = NOW()
                WHERE id = $3
                "#,
            )
            .bind(error)
            .bind(kind)
            .bind(job_id)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    async fn cancel(&self, job_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE jobs
            SET status = 'cancelled',
                error_kind = 'cancelled',
                updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(job_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn heartbeat(&self, job_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE jobs
            SET lease_expires_at = NOW() + ($1 || ' milliseconds')::INTERVAL,
                updated_at = NOW()
            WHERE id = $2 AND status = 'running'
            "#,
        )
        .bind(self.default_lease_ms.to_string())
        .bind(job_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enqueue_result_helpers() {
        let created = EnqueueResult::Created(Uuid::new_v4());
        assert!(created.is_created());

        let duplicate = EnqueueResult::Duplicate(Uuid::new_v4());
        assert!(!duplicate.is_created());
    }

    #[test]
    fn claimed_job_deserializes_args() {
        #[derive(serde::Deserialize)]
        struct Payload {
            value: u32,
        }

        let job = Job::for_command(
            "test",
            serde_json::json!({ "value": 7 }),
            None,
            None,
            JobPriority::Normal,
            3,
            60_000,
        );
        let claimed = ClaimedJob { id: job.id, job };

        let payload: Payload = claimed.deserialize().unwrap();
        assert_eq!(payload.value, 7);
    }

    #[test]
    fn claimed_job_without_args_fails_to_deserialize() {
        let mut job = Job::for_command(
            "test",
            serde_json::json!({}),
            None,
            None,
            JobPriority::Normal,
            3,
            60_000,
        );
        job.args = None;
        let claimed = ClaimedJob { id: job.id, job };

        assert!(claimed.deserialize::<serde_json::Value>().is_err());
    }
}
