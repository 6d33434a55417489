//! Shared fixtures: mock-backed ServerDeps and seeded records.

use std::sync::Arc;

use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use server_core::common::UserId;
use server_core::domains::projects::Project;
use server_core::kernel::jobs::{ClaimedJob, Job, JobQueue, PostgresJobQueue};
use server_core::kernel::{
    MemoryObjectStorage, MockCompletioner, MockSpeechSynthesizer, ServerDeps,
};
use server_core::server::app::build_job_registry;

/// Mock-backed application wiring with handles to drive the doubles.
pub struct TestApp {
    pub deps: Arc<ServerDeps>,
    pub ai: Arc<MockCompletioner>,
    pub storage: Arc<MemoryObjectStorage>,
    pub speech: Arc<MockSpeechSynthesizer>,
}

impl TestApp {
    pub fn new(pool: PgPool, ai: MockCompletioner) -> Self {
        let ai = Arc::new(ai);
        let storage = Arc::new(MemoryObjectStorage::new());
        let speech = Arc::new(MockSpeechSynthesizer::new());
        let jobs: Arc<dyn JobQueue> = Arc::new(PostgresJobQueue::new(pool.clone()));

        let deps = Arc::new(ServerDeps::new(
            pool,
            ai.clone(),
            storage.clone(),
            speech.clone(),
            jobs,
        ));

        Self {
            deps,
            ai,
            storage,
            speech,
        }
    }

    /// Execute a specific enqueued job the way the runner would, by id.
    ///
    /// Pulling the job by id (instead of claiming a batch) keeps tests
    /// independent of jobs enqueued by concurrently running tests.
    pub async fn run_job(&self, job_id: Uuid) -> Result<()> {
        let job = Job::find_by_id(job_id, &self.deps.db_pool).await?;
        let claimed = ClaimedJob { id: job.id, job };
        let registry = build_job_registry();
        registry.execute(&claimed, self.deps.clone()).await
    }
}

/// A user id for this test.
pub fn test_user() -> UserId {
    UserId::new()
}

/// Seed a project whose source blob exists in the mock storage.
pub async fn seed_project_with_source(
    app: &TestApp,
    user_id: UserId,
    file_name: &str,
    contents: &[u8],
) -> Result<Project> {
    let storage_key = format!("uploads/{}/{}", user_id, file_name);
    app.storage.put_object(&storage_key, contents.to_vec());

    Project::create(
        user_id,
        "Test project",
        Some(file_name),
        &storage_key,
        &app.deps.db_pool,
    )
    .await
}

/// Canned slide-deck JSON with `count` slides.
pub fn slide_deck_json(count: usize) -> String {
    let slides: Vec<serde_json::Value> = (1..=count)
        .map(|i| {
            serde_json::json!({
                "title": format!("Slide {}", i),
                "content": ["first point", "second point"],
                "speaker_notes": "notes"
            })
        })
        .collect();
    serde_json::json!({ "slides": slides }).to_string()
}

/// Count content rows for a (project, kind) pair.
pub async fn count_content_rows(pool: &PgPool, project_id: Uuid) -> Result<i64> {
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM generated_contents WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

