// Test doubles for kernel dependencies.
//
// Available to both unit tests and the integration suite, so mocks live in
// the normal build rather than behind cfg(test).

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use super::traits::{
    BaseCompletioner, BaseObjectStorage, BaseSpeechSynthesizer, Completion, TokenUsage,
};

// =============================================================================
// Mock Completioner
// =============================================================================

/// Scripted LLM double.
///
/// Queued responses are returned in order; once the queue is empty calls
/// fail, so tests notice unexpected extra calls. Prompts are recorded for
/// assertion.
pub struct MockCompletioner {
    responses: Mutex<Vec<Completion>>,
    prompts: Mutex<Vec<String>>,
}

impl MockCompletioner {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Queue a response with default usage (100 prompt / 50 completion tokens).
    pub fn with_response(self, content: &str) -> Self {
        self.with_response_and_usage(content, Some(TokenUsage { prompt_tokens: 100, completion_tokens: 50 }))
    }

    /// Queue a response with explicit usage.
    pub fn with_response_and_usage(self, content: &str, usage: Option<TokenUsage>) -> Self {
        self.responses.lock().unwrap().push(Completion {
            content: content.to_string(),
            usage,
        });
        self
    }

    /// All prompts seen so far (user prompt for structured calls).
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn next_response(&self, prompt: &str) -> Result<Completion> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            bail!("MockCompletioner has no queued response");
        }
        Ok(responses.remove(0))
    }
}

impl Default for MockCompletioner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseCompletioner for MockCompletioner {
    async fn complete(&self, _model: &str, prompt: &str) -> Result<Completion> {
        self.next_response(prompt)
    }

    async fn complete_structured(
        &self,
        _model: &str,
        _system_prompt: &str,
        user_prompt: &str,
        _schema: serde_json::Value,
    ) -> Result<Completion> {
        self.next_response(user_prompt)
    }
}

// =============================================================================
// In-memory Object Storage
// =============================================================================

/// HashMap-backed blob store with per-operation failure injection.
pub struct MemoryObjectStorage {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    deleted_keys: Mutex<Vec<String>>,
    fail_download: AtomicBool,
    fail_upload: AtomicBool,
    fail_delete: AtomicBool,
}

impl MemoryObjectStorage {
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            deleted_keys: Mutex::new(Vec::new()),
            fail_download: AtomicBool::new(false),
            fail_upload: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
        }
    }

    /// Seed a stored object.
    pub fn with_object(self, key: &str, bytes: Vec<u8>) -> Self {
        self.objects.lock().unwrap().insert(key.to_string(), bytes);
        self
    }

    pub fn put_object(&self, key: &str, bytes: Vec<u8>) {
        self.objects.lock().unwrap().insert(key.to_string(), bytes);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    pub fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    /// Keys for which delete was attempted (successful or not).
    pub fn deleted_keys(&self) -> Vec<String> {
        self.deleted_keys.lock().unwrap().clone()
    }

    pub fn set_fail_download(&self, fail: bool) {
        self.fail_download.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_upload(&self, fail: bool) {
        self.fail_upload.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }
}

impl Default for MemoryObjectStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseObjectStorage for MemoryObjectStorage {
    async fn download(&self, key: &str) -> Result<Vec<u8>> {
        if self.fail_download.load(Ordering::SeqCst) {
            bail!("injected download failure for {}", key);
        }
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("object {} not found", key))
    }

    async fn upload(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        if self.fail_upload.load(Ordering::SeqCst) {
            bail!("injected upload failure for {}", key);
        }
        self.objects.lock().unwrap().insert(key.to_string(), bytes);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.deleted_keys.lock().unwrap().push(key.to_string());
        if self.fail_delete.load(Ordering::SeqCst) {
            bail!("injected delete failure for {}", key);
        }
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://test-bucket.s3.us-east-1.amazonaws.com/{}", key)
    }
}

// =============================================================================
// Mock Speech Synthesizer
// =============================================================================

/// Speech double returning a fixed MP3 payload.
pub struct MockSpeechSynthesizer {
    fail: AtomicBool,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockSpeechSynthesizer {
    pub fn new() -> Self {
        Self {
            fail: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// (text, voice) pairs seen so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockSpeechSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseSpeechSynthesizer for MockSpeechSynthesizer {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), voice.to_string()));
        if self.fail.load(Ordering::SeqCst) {
            bail!("injected synthesis failure");
        }
        Ok(b"ID3mock-mp3-bytes".to_vec())
    }
}
