//! Derivative content generation.
//!
//! The request path validates, admits (balance check), upserts the
//! content row to pending and enqueues a job; the job runs the
//! download → extract → generate → upload pipeline and leaves the row
//! in a terminal state. Podcasts split into a synchronous script stage
//! and an asynchronous audio stage.

pub mod actions;
pub mod generators;
pub mod job_handlers;
pub mod jobs;
pub mod models;
pub mod options;
pub mod voice;

pub use models::{ContentKind, ContentStatus, GeneratedContent};
pub use options::GenerationRequest;
