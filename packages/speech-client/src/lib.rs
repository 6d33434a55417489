//! Minimal Azure Cognitive Services text-to-speech REST client.
//!
//! Sends SSML to the neural TTS endpoint and returns encoded MP3 bytes.
//! Voice selection is the caller's concern; this client only knows how to
//! speak a given voice name.
//!
//! # Example
//!
//! ```rust,ignore
//! use speech_client::SpeechClient;
//!
//! let client = SpeechClient::new(api_key, "eastus");
//! let mp3 = client.synthesize("Welcome to this learning session.", "en-US-AriaNeural").await?;
//! std::fs::write("podcast.mp3", mp3)?;
//! ```

pub mod error;

pub use error::{Result, SpeechError};

use tracing::{debug, warn};

/// MP3 output format requested from the synthesis endpoint.
const OUTPUT_FORMAT: &str = "audio-24khz-48kbitrate-mono-mp3";

/// Azure TTS REST client.
#[derive(Clone)]
pub struct SpeechClient {
    http_client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl SpeechClient {
    /// Create a new client for the given subscription key and region
    /// (e.g. "eastus").
    pub fn new(api_key: impl Into<String>, region: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key: api_key.into(),
            endpoint: format!("https://{}.tts.speech.microsoft.com/cognitiveservices/v1", region),
        }
    }

    /// Create from `SPEECH_API_KEY` and `SPEECH_REGION` environment variables.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("SPEECH_API_KEY")
            .map_err(|_| SpeechError::Config("SPEECH_API_KEY not set".into()))?;
        let region = std::env::var("SPEECH_REGION")
            .map_err(|_| SpeechError::Config("SPEECH_REGION not set".into()))?;
        Ok(Self::new(api_key, &region))
    }

    /// Set a custom endpoint URL (for sovereign clouds, proxies, tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Synthesize speech for `text` with the given voice name.
    ///
    /// Returns MP3-encoded audio bytes.
    pub async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
        if text.trim().is_empty() {
            return Err(SpeechError::InvalidInput("text is empty".into()));
        }

        let body = build_ssml(text, voice);
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(&self.endpoint)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", OUTPUT_FORMAT)
            .header("User-Agent", "speech-client")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "TTS request failed");
                SpeechError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "TTS API error");
            return Err(SpeechError::Api(format!("TTS API error {}: {}", status, error_text)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechError::Network(e.to_string()))?;

        debug!(
            voice = %voice,
            audio_bytes = bytes.len(),
            duration_ms = start.elapsed().as_millis(),
            "speech synthesized"
        );

        Ok(bytes.to_vec())
    }
}

/// Build the SSML envelope for a synthesis request.
fn build_ssml(text: &str, voice: &str) -> String {
    format!(
        "<speak version='1.0' xml:lang='en-US'><voice name='{}'>{}</voice></speak>",
        escape_xml(voice),
        escape_xml(text)
    )
}

/// Escape the five XML-reserved characters.
fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_regional_endpoint() {
        let client = SpeechClient::new("key", "eastus");
        assert_eq!(
            client.endpoint(),
            "https://eastus.tts.speech.microsoft.com/cognitiveservices/v1"
        );
    }

    #[test]
    fn ssml_wraps_text_in_voice_element() {
        let ssml = build_ssml("Hello there", "en-US-AriaNeural");
        assert!(ssml.contains("<voice name='en-US-AriaNeural'>Hello there</voice>"));
    }

    #[test]
    fn ssml_escapes_reserved_characters() {
        let ssml = build_ssml("a < b & c > d", "en-US-AriaNeural");
        assert!(ssml.contains("a &lt; b &amp; c &gt; d"));
    }

    #[test]
    fn empty_text_is_rejected() {
        let client = SpeechClient::new("key", "eastus");
        let result = tokio_test::block_on(client.synthesize("   ", "en-US-AriaNeural"));
        assert!(matches!(result, Err(SpeechError::InvalidInput(_))));
    }
}
