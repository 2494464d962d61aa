//! Composition parameters and time-to-frame conversion

use crate::utils::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Fraction of the composition width available to caption text
pub const CONTAINER_WIDTH_RATIO: f32 = 0.9;

/// Output video geometry and timing, derived from source video metadata
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Composition {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Frames per second
    pub fps: f64,
    /// Total number of frames in the composition
    pub duration_in_frames: u32,
}

impl Composition {
    /// Create composition parameters
    pub fn new(width: u32, height: u32, fps: f64, duration_in_frames: u32) -> Self {
        Self {
            width,
            height,
            fps,
            duration_in_frames,
        }
    }

    /// Reject zero-sized frames and non-positive frame rates
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CoreError::InvalidComposition(format!(
                "dimensions must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(CoreError::InvalidComposition(format!(
                "fps must be positive, got {}",
                self.fps
            )));
        }
        Ok(())
    }

    /// Width available for caption text (90% of the frame)
    pub fn container_width(&self) -> f32 {
        self.width as f32 * CONTAINER_WIDTH_RATIO
    }

    /// Convert seconds to a frame index on this composition's timeline
    pub fn frame_at(&self, seconds: f64) -> i64 {
        frame_at(seconds, self.fps)
    }

    /// Duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        f64::from(self.duration_in_frames) / self.fps
    }
}

impl Default for Composition {
    fn default() -> Self {
        Self::new(1080, 1920, 30.0, 900)
    }
}

/// Convert seconds to a frame index, rounding halves towards positive infinity.
///
/// Negative inputs round the same way (`-2.5` frames becomes `-2`), which keeps
/// relative offsets stable when a line starts slightly before its group.
pub fn frame_at(seconds: f64, fps: f64) -> i64 {
    round_half_up(seconds * fps) as i64
}

/// Round to the nearest integer with ties going towards positive infinity
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}
