//! Server dependencies for actions and job handlers.
//!
//! This is the central dependency container passed to every action and
//! background job handler. External services hide behind trait objects so
//! tests can inject the doubles from `test_dependencies`.

use sqlx::PgPool;
use std::sync::Arc;

use super::jobs::JobQueue;
use super::traits::{BaseCompletioner, BaseObjectStorage, BaseSpeechSynthesizer};

/// Server dependencies accessible to actions and job handlers.
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// LLM client for all generation and chat calls. Callers pass model
    /// constants (GPT_5_NANO, GPT_5_MINI) to select the model per-call.
    pub ai: Arc<dyn BaseCompletioner>,
    /// Blob store for source documents and generated artifacts.
    pub storage: Arc<dyn BaseObjectStorage>,
    /// Text-to-speech engine for podcast audio.
    pub speech: Arc<dyn BaseSpeechSynthesizer>,
    /// Durable queue for background command execution.
    pub jobs: Arc<dyn JobQueue>,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        db_pool: PgPool,
        ai: Arc<dyn BaseCompletioner>,
        storage: Arc<dyn BaseObjectStorage>,
        speech: Arc<dyn BaseSpeechSynthesizer>,
        jobs: Arc<dyn JobQueue>,
    ) -> Self {
        Self {
            db_pool,
            ai,
            storage,
            speech,
            jobs,
        }
    }
}
