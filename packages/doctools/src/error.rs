//! Error types for document tooling.

use thiserror::Error;

/// Errors raised while packaging artifacts.
///
/// Text extraction deliberately does not use this type: extraction failures
/// degrade to empty text (see [`crate::extract`]).
#[derive(Debug, Error)]
pub enum DocError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("invalid document: {0}")]
    Invalid(String),
}
