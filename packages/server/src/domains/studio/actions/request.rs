//! Generation request handler (synchronous boundary).
//!
//! Validates, enforces the balance pre-check, upserts the content row to
//! pending and dispatches the job. Never performs AI or storage I/O
//! itself.

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::common::{ApiError, ContentId, ProjectId, UserId};
use crate::domains::billing::{UserProfile, MIN_TOKEN_BALANCE};
use crate::domains::projects::Project;
use crate::domains::studio::jobs::GenerateContentJob;
use crate::domains::studio::models::GeneratedContent;
use crate::domains::studio::options::GenerationRequest;
use crate::kernel::jobs::JobQueueExt;
use crate::kernel::ServerDeps;

/// Accepted generation request: the row to poll and the queue job driving it.
#[derive(Debug, Serialize)]
pub struct GenerationAccepted {
    pub content_id: ContentId,
    pub job_id: Uuid,
}

/// Admit and dispatch a generation request.
///
/// Order matters: ownership and validation run before the admission
/// check, and nothing is persisted until all three pass. The prior
/// artifact is not deleted here — the job does that, keeping this path
/// fast.
pub async fn request_generation(
    project_id: ProjectId,
    user_id: UserId,
    request: GenerationRequest,
    deps: &ServerDeps,
) -> Result<GenerationAccepted, ApiError> {
    let project = Project::find_for_user(project_id, user_id, &deps.db_pool)
        .await?
        .ok_or(ApiError::NotFound("project"))?;

    request.validate().map_err(ApiError::Validation)?;

    let profile = UserProfile::get_or_create(user_id, &deps.db_pool).await?;
    if profile.token_balance < MIN_TOKEN_BALANCE {
        return Err(ApiError::InsufficientFunds);
    }

    let content =
        GeneratedContent::upsert_pending(project.id, request.kind(), &deps.db_pool).await?;

    let job = GenerateContentJob::new(content.id, request);
    let enqueued = deps.jobs.enqueue(job).await?;
    let job_id = enqueued.job_id();

    GeneratedContent::set_job(content.id, job_id, &deps.db_pool).await?;

    info!(
        content_id = %content.id,
        project_id = %project.id,
        job_id = %job_id,
        kind = ?content.kind,
        "generation dispatched"
    );

    Ok(GenerationAccepted {
        content_id: content.id,
        job_id,
    })
}
