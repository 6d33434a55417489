//! Azure TTS implementation of [`BaseSpeechSynthesizer`].

use anyhow::Result;
use async_trait::async_trait;
use speech_client::SpeechClient;

use super::traits::BaseSpeechSynthesizer;

/// Adapter from the Azure TTS REST client to the kernel speech trait.
pub struct AzureSpeechSynthesizer {
    client: SpeechClient,
}

impl AzureSpeechSynthesizer {
    pub fn new(client: SpeechClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BaseSpeechSynthesizer for AzureSpeechSynthesizer {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
        let audio = self.client.synthesize(text, voice).await?;
        Ok(audio)
    }
}
