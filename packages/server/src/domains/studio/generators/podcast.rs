//! Podcast script generation.
//!
//! Script generation is the fast half of the podcast pipeline: a single
//! LLM call returning a structured script the caller can review and edit
//! before committing to audio synthesis.

use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use openai_client::StructuredOutput;

use crate::domains::studio::options::{ContentFocus, PodcastLength, PodcastScriptRequest};
use crate::kernel::traits::{BaseCompletioner, TokenUsage};
use crate::kernel::GPT_5_NANO;

use super::{context_excerpt, NARRATION_TEXT_BUDGET};

/// A generated podcast script.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PodcastScript {
    pub title: String,
    pub description: String,
    /// The full narration text
    pub body: String,
}

/// Wire envelope: the model returns `{ "script": { ... } }`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct PodcastScriptResponse {
    script: PodcastScript,
}

const SYSTEM_PROMPT: &str =
    "You write engaging educational podcast scripts from study documents.";

fn length_instruction(length: PodcastLength) -> &'static str {
    match length {
        PodcastLength::Quick => {
            "Create a 2-3 minute podcast script focusing on key takeaways and essential points."
        }
        PodcastLength::Medium => {
            "Create a 4-6 minute podcast script balancing key concepts with engaging explanations."
        }
        PodcastLength::Comprehensive => {
            "Create a 7-10 minute podcast script with detailed explanations and comprehensive coverage."
        }
    }
}

fn focus_instruction(focus: ContentFocus) -> &'static str {
    match focus {
        ContentFocus::KeyConcepts => {
            "Focus primarily on the most important concepts, definitions, and core ideas."
        }
        ContentFocus::Summary => {
            "Provide a comprehensive summary hitting all major points concisely."
        }
        ContentFocus::FullDocument => {
            "Cover the full document content in an engaging, structured manner."
        }
    }
}

fn build_prompt(text: &str, request: &PodcastScriptRequest, document_title: &str) -> String {
    format!(
        r#"Please analyze this document and create an engaging podcast script based on the content.

{length}
{focus}

The script must have a "title", a "description", and a "body" containing the full podcast narration.

SCRIPT WRITING GUIDELINES:
1. Write in a conversational, engaging tone as if speaking directly to the listener
2. Use natural speech patterns with appropriate pauses
3. Include smooth transitions between topics
4. Explain complex concepts in simple, accessible language
5. Use rhetorical questions to engage the listener
6. Maintain an educational yet entertaining style
7. Include verbal signposts like "First," "Next," "Finally"
8. End with actionable takeaways or thought-provoking questions

Document title: {title}
Document content: {excerpt}

Create a script that transforms this written content into an engaging audio learning experience."#,
        length = length_instruction(request.podcast_length),
        focus = focus_instruction(request.content_focus),
        title = document_title,
        excerpt = context_excerpt(text, NARRATION_TEXT_BUDGET),
    )
}

/// Generate a podcast script from document text.
pub async fn generate_podcast_script(
    text: &str,
    request: &PodcastScriptRequest,
    document_title: &str,
    ai: &dyn BaseCompletioner,
) -> Result<(PodcastScript, Option<TokenUsage>)> {
    let prompt = build_prompt(text, request, document_title);
    let completion = ai
        .complete_structured(
            GPT_5_NANO,
            SYSTEM_PROMPT,
            &prompt,
            PodcastScriptResponse::openai_schema(),
        )
        .await?;

    let response: PodcastScriptResponse = serde_json::from_str(&completion.content)
        .context("podcast script response did not match the expected shape")?;

    Ok((response.script, completion.usage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::MockCompletioner;

    fn script_json() -> String {
        serde_json::json!({
            "script": {
                "title": "Cell Biology Basics",
                "description": "A walk through the cell",
                "body": "Welcome to this learning session on cell biology."
            }
        })
        .to_string()
    }

    #[tokio::test]
    async fn script_is_parsed_from_envelope() {
        let ai = MockCompletioner::new().with_response(&script_json());
        let request = PodcastScriptRequest {
            podcast_length: PodcastLength::Medium,
            content_focus: ContentFocus::FullDocument,
        };

        let (script, usage) = generate_podcast_script("text", &request, "cells.pdf", &ai)
            .await
            .unwrap();
        assert_eq!(script.title, "Cell Biology Basics");
        assert!(script.body.starts_with("Welcome"));
        assert!(usage.is_some());
    }

    #[tokio::test]
    async fn prompt_reflects_length_and_focus() {
        let ai = MockCompletioner::new().with_response(&script_json());
        let request = PodcastScriptRequest {
            podcast_length: PodcastLength::Quick,
            content_focus: ContentFocus::KeyConcepts,
        };

        generate_podcast_script("text", &request, "cells.pdf", &ai)
            .await
            .unwrap();

        let prompt = &ai.prompts()[0];
        assert!(prompt.contains("2-3 minute"));
        assert!(prompt.contains("most important concepts"));
        assert!(prompt.contains("cells.pdf"));
    }

    #[tokio::test]
    async fn missing_envelope_fails() {
        let ai = MockCompletioner::new()
            .with_response(r#"{ "title": "no envelope", "description": "", "body": "" }"#);
        let request = PodcastScriptRequest {
            podcast_length: PodcastLength::Medium,
            content_focus: ContentFocus::FullDocument,
        };

        assert!(generate_podcast_script("text", &request, "doc", &ai).await.is_err());
    }
}
