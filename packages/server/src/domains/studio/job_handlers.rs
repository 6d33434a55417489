//! Job handlers for the studio domain.
//!
//! Registered with the JobRegistry and called by the JobRunner. Every
//! code path through a handler ends in a terminal status write on the
//! content row: success with a URL, or failure with the error re-raised
//! so the queue records it and applies its retry policy.
//!
//! ## Pipeline Flow
//!
//! ```text
//! GenerateContentJob      → cleanup old blob → profile → download/extract
//!                           → generate → settle cost → upload → success
//! GeneratePodcastAudioJob → cleanup old blob → synthesize → upload → success
//! ```

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::domains::billing::{calculate_cost, UserProfile};
use crate::domains::projects::actions::fetch_source_text;
use crate::domains::projects::Project;
use crate::domains::studio::generators::{flashcards, mcqs, slides};
use crate::domains::studio::jobs::{GeneratePodcastAudioJob, GenerateContentJob};
use crate::domains::studio::models::GeneratedContent;
use crate::domains::studio::options::{GenerationRequest, VoiceOptions};
use crate::domains::studio::voice::resolve_voice;
use crate::kernel::jobs::JobRegistry;
use crate::kernel::{generated_key, ServerDeps, GPT_5_NANO};

/// Register studio job handlers.
pub fn register_studio_jobs(registry: &mut JobRegistry) {
    registry.register::<GenerateContentJob, _, _>(GenerateContentJob::JOB_TYPE, |job, deps| async move {
        handle_generate_content(job, deps).await
    });
    registry.register::<GeneratePodcastAudioJob, _, _>(
        GeneratePodcastAudioJob::JOB_TYPE,
        |job, deps| async move { handle_generate_podcast_audio(job, deps).await },
    );
}

/// Handle GenerateContentJob.
///
/// Runs the full generation pipeline and leaves the content row in a
/// terminal state. Errors are recorded as `failure` and re-raised for the
/// queue's retry/dead-letter machinery.
pub async fn handle_generate_content(job: GenerateContentJob, deps: Arc<ServerDeps>) -> Result<()> {
    let content = GeneratedContent::find_by_id(job.content_id, &deps.db_pool).await?;

    info!(
        content_id = %content.id,
        project_id = %content.project_id,
        kind = ?content.kind,
        "handling generate content job"
    );

    cleanup_previous_artifact(&content, &deps).await;

    match run_generation(&content, &job.options, &deps).await {
        Ok(url) => {
            GeneratedContent::mark_succeeded(content.id, &url, &deps.db_pool).await?;
            info!(content_id = %content.id, url = %url, "content generation succeeded");
            Ok(())
        }
        Err(e) => {
            if let Err(mark_err) = GeneratedContent::mark_failed(content.id, &deps.db_pool).await {
                warn!(
                    content_id = %content.id,
                    error = %mark_err,
                    "failed to record failure status"
                );
            }
            Err(e)
        }
    }
}

/// Handle GeneratePodcastAudioJob.
///
/// Synthesis-only tail of the podcast pipeline: same cleanup/upload/
/// terminal-write discipline, no LLM call, no cost deduction.
pub async fn handle_generate_podcast_audio(
    job: GeneratePodcastAudioJob,
    deps: Arc<ServerDeps>,
) -> Result<()> {
    let content = GeneratedContent::find_by_id(job.content_id, &deps.db_pool).await?;

    info!(
        content_id = %content.id,
        project_id = %content.project_id,
        "handling podcast audio job"
    );

    cleanup_previous_artifact(&content, &deps).await;

    match run_audio_synthesis(&content, &job.script_text, &job.voice, &deps).await {
        Ok(url) => {
            GeneratedContent::mark_succeeded(content.id, &url, &deps.db_pool).await?;
            info!(content_id = %content.id, url = %url, "podcast audio succeeded");
            Ok(())
        }
        Err(e) => {
            if let Err(mark_err) = GeneratedContent::mark_failed(content.id, &deps.db_pool).await {
                warn!(
                    content_id = %content.id,
                    error = %mark_err,
                    "failed to record failure status"
                );
            }
            Err(e)
        }
    }
}

/// Best-effort deletion of the row's previous artifact.
///
/// An orphaned old blob is recoverable manual cleanup; a user-facing job
/// failure over a stale blob is not. Errors are logged and swallowed.
async fn cleanup_previous_artifact(content: &GeneratedContent, deps: &ServerDeps) {
    let Some(url) = &content.output_url else {
        return;
    };

    let Some(key) = deps.storage.key_from_url(url) else {
        warn!(content_id = %content.id, url = %url, "could not derive storage key from old url");
        return;
    };

    match deps.storage.delete(&key).await {
        Ok(()) => info!(content_id = %content.id, key = %key, "deleted old artifact"),
        Err(e) => warn!(
            content_id = %content.id,
            key = %key,
            error = %e,
            "could not delete old artifact; continuing"
        ),
    }
}

/// The generation pipeline proper. Returns the public URL of the stored
/// artifact; any error is terminal for this run.
async fn run_generation(
    content: &GeneratedContent,
    options: &GenerationRequest,
    deps: &ServerDeps,
) -> Result<String> {
    let project = Project::find_by_id(content.project_id, &deps.db_pool).await?;

    // The job may be the first entry point for this user, so the profile
    // is created here if the request path never ran (e.g. a replayed job).
    UserProfile::get_or_create(project.user_id, &deps.db_pool).await?;

    let text = fetch_source_text(&project, deps.storage.as_ref()).await?;
    if text.trim().is_empty() {
        bail!("extracted text is empty; cannot generate content");
    }

    let scratch = tempfile::tempdir().context("failed to create scratch directory")?;

    let (artifact_path, usage) = match options {
        GenerationRequest::SlideDeck(slide_options) => {
            let (deck, usage) = slides::generate_slide_deck(&text, slide_options, deps.ai.as_ref()).await?;
            (slides::write_artifact(&deck, scratch.path())?, usage)
        }
        GenerationRequest::FlashcardSet(card_options) => {
            let (set, usage) =
                flashcards::generate_flashcards(&text, card_options, deps.ai.as_ref()).await?;
            (flashcards::write_artifact(&set, scratch.path())?, usage)
        }
        GenerationRequest::McqSet(mcq_options) => {
            let (set, usage) = mcqs::generate_mcqs(&text, mcq_options, deps.ai.as_ref()).await?;
            (mcqs::write_artifact(&set, scratch.path())?, usage)
        }
    };

    let cost = usage
        .map(|u| calculate_cost(GPT_5_NANO, &u))
        .unwrap_or(Decimal::ZERO);
    if cost > Decimal::ZERO {
        let profile = UserProfile::debit(project.user_id, cost, &deps.db_pool).await?;
        info!(
            user_id = %project.user_id,
            cost = %cost,
            balance = %profile.token_balance,
            "settled generation cost"
        );
    }

    let file_name = artifact_path
        .file_name()
        .and_then(|n| n.to_str())
        .context("artifact has no file name")?;
    let key = generated_key(project.id, content.id, file_name);

    let bytes = std::fs::read(&artifact_path).context("failed to read generated artifact")?;
    deps.storage.upload(&key, bytes).await?;

    Ok(deps.storage.public_url(&key))
    // scratch dir dropped here: the transient artifact is removed whether
    // or not the upload above succeeded
}

/// The synthesis pipeline for podcast audio.
async fn run_audio_synthesis(
    content: &GeneratedContent,
    script_text: &str,
    voice_options: &VoiceOptions,
    deps: &ServerDeps,
) -> Result<String> {
    if script_text.trim().is_empty() {
        bail!("script text is empty; cannot synthesize audio");
    }

    let voice = resolve_voice(voice_options);
    let audio = deps.speech.synthesize(script_text, voice).await?;

    let key = generated_key(content.project_id, content.id, "podcast.mp3");
    deps.storage.upload(&key, audio).await?;

    Ok(deps.storage.public_url(&key))
}
