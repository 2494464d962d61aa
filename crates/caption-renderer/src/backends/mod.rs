//! Rasterization backends for compositor output

use crate::compositor::FrameState;
use crate::renderer::Frame;
use crate::utils::RenderError;

#[cfg(feature = "software-backend")]
pub mod blur;
#[cfg(feature = "software-backend")]
pub mod software;

#[cfg(feature = "software-backend")]
pub use software::SoftwareRasterizer;

/// Backend type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// CPU-based software renderer
    Software,
}

impl BackendType {
    /// Get backend type as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Software => "Software",
        }
    }
}

/// Turns per-frame primitives into pixels
pub trait Rasterizer: Send + Sync {
    /// Get the backend type
    fn backend_type(&self) -> BackendType;

    /// Paint every visible word of `state` onto a transparent frame
    fn rasterize(&self, state: &FrameState) -> Result<Frame, RenderError>;
}
