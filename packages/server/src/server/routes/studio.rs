use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;

use crate::common::{ApiError, ContentId, ProjectId};
use crate::domains::studio::actions::{self, GenerationAccepted};
use crate::domains::studio::generators::podcast::PodcastScript;
use crate::domains::studio::models::GeneratedContent;
use crate::domains::studio::options::{GenerationRequest, PodcastAudioRequest, PodcastScriptRequest};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

use super::require_auth;

/// Start generation of a slide deck, flashcard set or MCQ set.
///
/// Returns 202: the caller polls the content row for the outcome.
pub async fn generate_content(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(project_id): Path<ProjectId>,
    Json(request): Json<GenerationRequest>,
) -> Result<(StatusCode, Json<GenerationAccepted>), ApiError> {
    let auth = require_auth(auth)?;
    let accepted =
        actions::request_generation(project_id, auth.user_id, request, &state.deps).await?;
    Ok((StatusCode::ACCEPTED, Json(accepted)))
}

/// Generate a podcast script inline and return it for review.
pub async fn generate_podcast_script(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(project_id): Path<ProjectId>,
    Json(request): Json<PodcastScriptRequest>,
) -> Result<Json<PodcastScript>, ApiError> {
    let auth = require_auth(auth)?;
    let script =
        actions::generate_podcast_script(project_id, auth.user_id, request, &state.deps).await?;
    Ok(Json(script))
}

/// Start audio synthesis for a (possibly edited) script.
pub async fn generate_podcast_audio(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(project_id): Path<ProjectId>,
    Json(request): Json<PodcastAudioRequest>,
) -> Result<(StatusCode, Json<GenerationAccepted>), ApiError> {
    let auth = require_auth(auth)?;
    let accepted =
        actions::request_podcast_audio(project_id, auth.user_id, request, &state.deps).await?;
    Ok((StatusCode::ACCEPTED, Json(accepted)))
}

/// List a project's content rows (the polling surface).
pub async fn list_contents(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(project_id): Path<ProjectId>,
) -> Result<Json<Vec<GeneratedContent>>, ApiError> {
    let auth = require_auth(auth)?;

    let detail = crate::domains::projects::actions::get_project(
        project_id,
        auth.user_id,
        &state.deps,
    )
    .await?;

    Ok(Json(detail.generated_content))
}

/// Fetch one content row by id.
pub async fn get_content(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(content_id): Path<ContentId>,
) -> Result<Json<GeneratedContent>, ApiError> {
    let auth = require_auth(auth)?;

    let content = GeneratedContent::find_for_user(content_id, auth.user_id, &state.deps.db_pool)
        .await?
        .ok_or(ApiError::NotFound("content"))?;

    Ok(Json(content))
}
