//! Chat message actions.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::common::{ApiError, ProjectId, SessionId, UserId};
use crate::domains::chat::jobs::ChatReplyJob;
use crate::domains::chat::models::{ChatMessage, ChatSession, Sender};
use crate::domains::projects::Project;
use crate::kernel::jobs::JobQueueExt;
use crate::kernel::ServerDeps;

#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub project_id: ProjectId,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageAccepted {
    pub session_id: SessionId,
    pub job_id: Uuid,
}

/// A session with its full message history.
#[derive(Debug, Serialize)]
pub struct SessionDetail {
    #[serde(flatten)]
    pub session: ChatSession,
    pub messages: Vec<ChatMessage>,
}

/// Post a user message and dispatch the AI reply job.
pub async fn post_message(
    user_id: UserId,
    request: PostMessageRequest,
    deps: &ServerDeps,
) -> Result<MessageAccepted, ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::Validation("message must not be empty".into()));
    }

    let project = Project::find_for_user(request.project_id, user_id, &deps.db_pool)
        .await?
        .ok_or(ApiError::NotFound("project"))?;

    let session = ChatSession::get_or_create(project.id, user_id, &deps.db_pool).await?;

    ChatMessage::append(session.id, Sender::User, request.message.trim(), &deps.db_pool).await?;

    let job = ChatReplyJob::new(session.id, request.message.trim().to_string());
    let enqueued = deps.jobs.enqueue(job).await?;

    info!(session_id = %session.id, "chat message accepted");

    Ok(MessageAccepted {
        session_id: session.id,
        job_id: enqueued.job_id(),
    })
}

/// Fetch a project's chat session and messages for its owner.
pub async fn get_session(
    project_id: ProjectId,
    user_id: UserId,
    deps: &ServerDeps,
) -> Result<SessionDetail, ApiError> {
    let session = ChatSession::find_for_project(project_id, user_id, &deps.db_pool)
        .await?
        .ok_or(ApiError::NotFound("chat session"))?;

    let messages = ChatMessage::list_for_session(session.id, &deps.db_pool).await?;

    Ok(SessionDetail { session, messages })
}
