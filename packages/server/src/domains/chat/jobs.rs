//! ChatReplyJob - background AI response to a chat message.

use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::common::SessionId;
use crate::domains::chat::models::{ChatMessage, ChatSession, Sender};
use crate::domains::projects::actions::fetch_source_text;
use crate::domains::projects::Project;
use crate::domains::studio::generators::{context_excerpt, NARRATION_TEXT_BUDGET};
use crate::kernel::jobs::{CommandMeta, JobRegistry};
use crate::kernel::{ServerDeps, GPT_5_NANO};

/// Job to produce the AI reply for one posted message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReplyJob {
    pub session_id: SessionId,
    pub message: String,
}

impl ChatReplyJob {
    /// The job type identifier used in the jobs table.
    pub const JOB_TYPE: &'static str = "chat_reply";

    pub fn new(session_id: SessionId, message: String) -> Self {
        Self {
            session_id,
            message,
        }
    }
}

impl CommandMeta for ChatReplyJob {
    fn command_type(&self) -> &'static str {
        Self::JOB_TYPE
    }

    fn reference_id(&self) -> Option<Uuid> {
        Some(self.session_id.into_uuid())
    }
}

/// Register chat job handlers.
pub fn register_chat_jobs(registry: &mut JobRegistry) {
    registry.register::<ChatReplyJob, _, _>(ChatReplyJob::JOB_TYPE, |job, deps| async move {
        handle_chat_reply(job, deps).await
    });
}

/// Handle ChatReplyJob.
///
/// Rebuilds document context from the project source, asks the model,
/// and appends the reply. Replies are free; no cost is deducted.
pub async fn handle_chat_reply(job: ChatReplyJob, deps: Arc<ServerDeps>) -> Result<()> {
    let session = ChatSession::find_by_id(job.session_id, &deps.db_pool).await?;
    let project = Project::find_by_id(session.project_id, &deps.db_pool).await?;

    let document_text = fetch_source_text(&project, deps.storage.as_ref()).await?;

    let prompt = build_prompt(&document_text, &job.message);
    let completion = deps.ai.complete(GPT_5_NANO, &prompt).await?;

    ChatMessage::append(session.id, Sender::Assistant, &completion.content, &deps.db_pool).await?;

    info!(session_id = %session.id, "chat reply appended");
    Ok(())
}

fn build_prompt(document_text: &str, user_message: &str) -> String {
    format!(
        r#"You are a helpful assistant. A user is asking a question about a document.
Here is the context from the document:
---
{context}
---
Here is the user's question: "{question}"

Please provide a clear and helpful answer based on the document context."#,
        context = context_excerpt(document_text, NARRATION_TEXT_BUDGET),
        question = user_message,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_meta_references_the_session() {
        let session_id = SessionId::new();
        let job = ChatReplyJob::new(session_id, "what is this about?".into());

        assert_eq!(job.command_type(), "chat_reply");
        assert_eq!(job.reference_id(), Some(session_id.into_uuid()));
    }

    #[test]
    fn prompt_embeds_context_and_question() {
        let prompt = build_prompt("the krebs cycle", "what cycle is discussed?");
        assert!(prompt.contains("the krebs cycle"));
        assert!(prompt.contains("what cycle is discussed?"));
    }

    #[test]
    fn prompt_context_is_bounded() {
        let long_document = "x".repeat(50_000);
        let prompt = build_prompt(&long_document, "q");
        assert!(prompt.len() < NARRATION_TEXT_BUDGET + 1_000);
    }
}
