//! OpenAI-backed implementation of [`BaseCompletioner`].

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient, StructuredRequest};

use super::traits::{BaseCompletioner, Completion, TokenUsage};

/// Adapter from the OpenAI REST client to the kernel completion trait.
pub struct OpenAiCompletioner {
    client: OpenAIClient,
}

impl OpenAiCompletioner {
    pub fn new(client: OpenAIClient) -> Self {
        Self { client }
    }
}

fn usage_from(usage: Option<openai_client::Usage>) -> Option<TokenUsage> {
    usage.map(|u| TokenUsage {
        prompt_tokens: u.prompt_tokens,
        completion_tokens: u.completion_tokens,
    })
}

#[async_trait]
impl BaseCompletioner for OpenAiCompletioner {
    async fn complete(&self, model: &str, prompt: &str) -> Result<Completion> {
        let response = self
            .client
            .chat_completion(ChatRequest::new(model).message(Message::user(prompt)))
            .await?;

        Ok(Completion {
            content: response.content,
            usage: usage_from(response.usage),
        })
    }

    async fn complete_structured(
        &self,
        model: &str,
        system_prompt: &str,
        user_prompt: &str,
        schema: serde_json::Value,
    ) -> Result<Completion> {
        let response = self
            .client
            .structured_output(StructuredRequest::new(
                model,
                system_prompt,
                user_prompt,
                schema,
            ))
            .await?;

        Ok(Completion {
            content: response.content,
            usage: usage_from(response.usage),
        })
    }
}
