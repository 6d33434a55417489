// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Generation prompts, voice tables, and pricing live in the domains.
//
// Naming convention: Base* for trait names (e.g., BaseCompletioner)

use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// LLM Completion Trait
// =============================================================================

/// Token counts reported by a completion call, used for cost settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// A completion result: the text (or JSON) content plus usage when the
/// provider reports it.
#[derive(Debug, Clone)]
pub struct Completion {
    pub content: String,
    pub usage: Option<TokenUsage>,
}

#[async_trait]
pub trait BaseCompletioner: Send + Sync {
    /// Complete a free-form prompt.
    async fn complete(&self, model: &str, prompt: &str) -> Result<Completion>;

    /// Complete with a strict JSON-schema response format.
    ///
    /// The returned content is a JSON string conforming to `schema`;
    /// callers parse it with serde_json.
    async fn complete_structured(
        &self,
        model: &str,
        system_prompt: &str,
        user_prompt: &str,
        schema: serde_json::Value,
    ) -> Result<Completion>;
}

// =============================================================================
// Object Storage Trait
// =============================================================================

#[async_trait]
pub trait BaseObjectStorage: Send + Sync {
    /// Download a blob by key.
    async fn download(&self, key: &str) -> Result<Vec<u8>>;

    /// Upload a blob under the given key, overwriting any existing object.
    async fn upload(&self, key: &str, bytes: Vec<u8>) -> Result<()>;

    /// Delete a blob by key.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Public URL for a stored key.
    fn public_url(&self, key: &str) -> String;

    /// Recover a storage key from a public URL previously returned by
    /// [`Self::public_url`]. Keys start after the host portion.
    fn key_from_url(&self, url: &str) -> Option<String> {
        url.split_once(".com/").map(|(_, key)| key.to_string())
    }
}

// =============================================================================
// Text-to-Speech Trait
// =============================================================================

#[async_trait]
pub trait BaseSpeechSynthesizer: Send + Sync {
    /// Synthesize MP3 audio for `text` with the given engine voice name.
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>>;
}
