//! Job infrastructure for background command execution.
//!
//! This module provides the kernel-level machinery only; the commands
//! themselves (content generation, podcast audio, chat replies) live in
//! their domains.
//!
//! # Architecture
//!
//! ```text
//! Action calls deps.jobs.enqueue(cmd)
//!     │
//!     └─► PostgresJobQueue ─► INSERT into jobs
//!
//! JobRunner (background task)
//!     │
//!     ├─► claim ready jobs (FOR UPDATE SKIP LOCKED, lease recovery)
//!     ├─► JobRegistry: deserialize args + dispatch to domain handler
//!     └─► mark succeeded / failed (retry with backoff, then dead-letter)
//! ```

mod job;
mod queue;
mod registry;
mod runner;

pub use job::{ErrorKind, Job, JobPriority, JobStatus};
pub use queue::{
    ClaimedJob, CommandMeta, EnqueueResult, JobQueue, JobQueueExt, JobSpec, PostgresJobQueue,
};
pub use registry::{JobRegistry, SharedJobRegistry};
pub use runner::{JobRunner, JobRunnerConfig};
