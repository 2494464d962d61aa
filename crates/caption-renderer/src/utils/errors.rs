//! Error types for rendering

use thiserror::Error;

/// Rendering error types
#[derive(Debug, Error)]
pub enum RenderError {
    /// Invalid dimensions provided
    #[error("Invalid dimensions: dimensions must be positive and non-zero")]
    InvalidDimensions,

    /// Invalid buffer size
    #[error("Invalid buffer size: expected {expected} bytes, got {actual}")]
    InvalidBufferSize {
        /// Expected size
        expected: usize,
        /// Actual size
        actual: usize,
    },

    /// Invalid pixmap creation
    #[error("Failed to create pixmap")]
    InvalidPixmap,

    /// A font family needed for measurement is not registered yet
    #[error("Font not loaded: {0}")]
    FontNotLoaded(String),

    /// Fonts did not become available before the wait deadline
    #[error("Fonts unavailable after {waited_ms}ms: {}", families.join(", "))]
    FontsUnavailable {
        /// Families still missing
        families: Vec<String>,
        /// How long the caller waited
        waited_ms: u64,
    },

    /// Font error
    #[error("Font error: {0}")]
    FontError(String),

    /// Shaping error
    #[error("Text shaping failed: {0}")]
    ShapingError(String),

    /// Layout error
    #[error("Layout failed: {0}")]
    LayoutError(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Export stopped by its cancellation handle
    #[error("Render cancelled at frame {0}")]
    Cancelled(i64),

    /// Core error from caption-core
    #[error("Core error: {0}")]
    CoreError(#[from] caption_core::CoreError),

    /// IO error
    #[error("IO error: {0}")]
    IOError(String),
}

impl RenderError {
    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ShapingError(_) | Self::FontError(_) | Self::LayoutError(_)
        )
    }

    /// Check if error indicates missing resources
    pub fn is_resource_error(&self) -> bool {
        matches!(
            self,
            Self::FontError(_) | Self::FontNotLoaded(_) | Self::FontsUnavailable { .. }
        )
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        Self::IOError(err.to_string())
    }
}
