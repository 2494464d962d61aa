//! Error types for transcript and style handling

use thiserror::Error;

/// Result alias used throughout `caption-core`
pub type Result<T> = core::result::Result<T, CoreError>;

/// Errors raised while reading or validating caption inputs
#[derive(Debug, Error)]
pub enum CoreError {
    /// Color string could not be parsed
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Transcript document is structurally invalid
    #[error("Invalid transcript: {0}")]
    InvalidTranscript(String),

    /// Composition parameters are unusable
    #[error("Invalid composition: {0}")]
    InvalidComposition(String),

    /// JSON decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Check if the error comes from malformed input data rather than decoding
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidColor(_) | Self::InvalidTranscript(_) | Self::InvalidComposition(_)
        )
    }
}
