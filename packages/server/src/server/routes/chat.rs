use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;

use crate::common::{ApiError, ProjectId};
use crate::domains::chat::actions::{self, MessageAccepted, PostMessageRequest, SessionDetail};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

use super::require_auth;

/// Post a message; the AI reply arrives asynchronously.
pub async fn post_message(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(request): Json<PostMessageRequest>,
) -> Result<(StatusCode, Json<MessageAccepted>), ApiError> {
    let auth = require_auth(auth)?;
    let accepted = actions::post_message(auth.user_id, request, &state.deps).await?;
    Ok((StatusCode::ACCEPTED, Json(accepted)))
}

/// Fetch a project's chat session with its message history.
pub async fn get_session(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(project_id): Path<ProjectId>,
) -> Result<Json<SessionDetail>, ApiError> {
    let auth = require_auth(auth)?;
    let detail = actions::get_session(project_id, auth.user_id, &state.deps).await?;
    Ok(Json(detail))
}
