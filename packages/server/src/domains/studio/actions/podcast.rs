//! Podcast script and audio actions.
//!
//! Script generation is synchronous — a single LLM call whose result the
//! caller may review and edit before committing to synthesis. The audio
//! stage is a background job like any other generation.

use tracing::info;

use crate::common::{ApiError, ProjectId, UserId};
use crate::domains::billing::{calculate_cost, UserProfile, MIN_TOKEN_BALANCE};
use crate::domains::projects::actions::fetch_source_text;
use crate::domains::projects::Project;
use crate::domains::studio::generators::podcast::{generate_podcast_script as generate_script, PodcastScript};
use crate::domains::studio::jobs::GeneratePodcastAudioJob;
use crate::domains::studio::models::{ContentKind, GeneratedContent};
use crate::domains::studio::options::{PodcastAudioRequest, PodcastScriptRequest};
use crate::kernel::jobs::JobQueueExt;
use crate::kernel::{ServerDeps, GPT_5_NANO};

use super::request::GenerationAccepted;

/// Generate a podcast script inline and return it to the caller.
///
/// Deliberately synchronous: no GeneratedContent row is touched, and the
/// cost is settled immediately against the caller's balance.
pub async fn generate_podcast_script(
    project_id: ProjectId,
    user_id: UserId,
    request: PodcastScriptRequest,
    deps: &ServerDeps,
) -> Result<PodcastScript, ApiError> {
    let project = Project::find_for_user(project_id, user_id, &deps.db_pool)
        .await?
        .ok_or(ApiError::NotFound("project"))?;

    let profile = UserProfile::get_or_create(user_id, &deps.db_pool).await?;
    if profile.token_balance < MIN_TOKEN_BALANCE {
        return Err(ApiError::InsufficientFunds);
    }

    let text = fetch_source_text(&project, deps.storage.as_ref()).await?;
    if text.trim().is_empty() {
        return Err(ApiError::Validation(
            "document contains no extractable text".into(),
        ));
    }

    let document_title = project
        .original_file_name
        .as_deref()
        .unwrap_or(&project.title);

    let (script, usage) = generate_script(&text, &request, document_title, deps.ai.as_ref())
        .await
        .map_err(ApiError::Internal)?;

    if let Some(usage) = usage {
        let cost = calculate_cost(GPT_5_NANO, &usage);
        if cost > rust_decimal::Decimal::ZERO {
            UserProfile::debit(user_id, cost, &deps.db_pool).await?;
            info!(user_id = %user_id, cost = %cost, "settled script cost");
        }
    }

    info!(project_id = %project.id, "podcast script generated");
    Ok(script)
}

/// Admit and dispatch the audio synthesis stage.
///
/// Takes the caller-supplied (possibly edited) script. No balance check
/// here — the paid work already happened in the script stage.
pub async fn request_podcast_audio(
    project_id: ProjectId,
    user_id: UserId,
    request: PodcastAudioRequest,
    deps: &ServerDeps,
) -> Result<GenerationAccepted, ApiError> {
    let project = Project::find_for_user(project_id, user_id, &deps.db_pool)
        .await?
        .ok_or(ApiError::NotFound("project"))?;

    if request.script_text.trim().is_empty() {
        return Err(ApiError::Validation("script_text must not be empty".into()));
    }

    let content =
        GeneratedContent::upsert_pending(project.id, ContentKind::Podcast, &deps.db_pool).await?;

    let job = GeneratePodcastAudioJob::new(content.id, request.script_text, request.voice);
    let enqueued = deps.jobs.enqueue(job).await?;
    let job_id = enqueued.job_id();

    GeneratedContent::set_job(content.id, job_id, &deps.db_pool).await?;

    info!(
        content_id = %content.id,
        project_id = %project.id,
        job_id = %job_id,
        "podcast audio dispatched"
    );

    Ok(GenerationAccepted {
        content_id: content.id,
        job_id,
    })
}
