//! Error types for the speech client.

use thiserror::Error;

/// Result type for speech client operations.
pub type Result<T> = std::result::Result<T, SpeechError>;

/// Speech client errors.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Configuration error (missing key or region)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input (empty text)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response)
    #[error("API error: {0}")]
    Api(String),
}
