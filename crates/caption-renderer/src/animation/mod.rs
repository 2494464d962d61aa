//! Per-word entrance and decay curves
//!
//! Every value here is a pure function of the frame number. A word's entrance
//! is driven by a spring started [`ANTICIPATION_FRAMES`] before the word is
//! spoken; after [`MAX_DISPLAY_SECONDS`] the word fades out and blurs away
//! while keeping its slot in the line.

mod assign;
mod spring;

pub use assign::{
    assign_animations, assign_for_group, rolling_hash, seed_key, shuffled_archetypes,
    SeededRandom,
};
pub use spring::{spring, SpringConfig, ENTRANCE_SPRING};

use crate::utils::interpolate;
use caption_core::composition::round_half_up;
use caption_core::AnimationType;

/// Frames an entrance starts before the word's spoken time
pub const ANTICIPATION_FRAMES: i64 = 4;

/// Seconds a word stays fully visible after it is spoken
pub const MAX_DISPLAY_SECONDS: f64 = 3.0;

/// Length of the fade-out in frames
pub const FADE_OUT_DURATION_FRAMES: f64 = 30.0;

/// Blur in pixels of a fully faded word
pub const FADE_OUT_BLUR: f64 = 10.0;

/// Animated visual state of one word
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordVisual {
    /// Opacity, 1 is opaque; spring overshoot may push it past 1
    pub opacity: f64,
    /// Gaussian blur in pixels
    pub blur: f64,
    /// Horizontal offset in pixels
    pub translate_x: f64,
    /// Vertical offset in pixels
    pub translate_y: f64,
    /// Uniform scale
    pub scale: f64,
}

impl WordVisual {
    /// Fully settled word
    pub const SETTLED: Self = Self {
        opacity: 1.0,
        blur: 0.0,
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
    };

    /// Fully faded word
    pub const HIDDEN: Self = Self {
        opacity: 0.0,
        blur: FADE_OUT_BLUR,
        ..Self::SETTLED
    };
}

/// Entrance state for `animation` at spring `progress` (0 at rest, 1 settled).
/// Values extrapolate when the spring overshoots.
pub fn entrance(animation: AnimationType, progress: f64) -> WordVisual {
    let opacity = interpolate(progress, (0.0, 1.0), (0.0, 1.0));
    let blur = interpolate(progress, (0.0, 1.0), (4.0, 0.0));
    let mut visual = WordVisual {
        opacity,
        blur,
        ..WordVisual::SETTLED
    };

    match animation {
        AnimationType::SlideUp => {
            visual.translate_y = interpolate(progress, (0.0, 1.0), (50.0, 0.0));
        }
        AnimationType::SlideDown => {
            visual.translate_y = interpolate(progress, (0.0, 1.0), (-50.0, 0.0));
        }
        AnimationType::SlideLeft => {
            visual.translate_x = interpolate(progress, (0.0, 1.0), (100.0, 0.0));
        }
        AnimationType::SlideRight => {
            visual.translate_x = interpolate(progress, (0.0, 1.0), (-100.0, 0.0));
        }
        AnimationType::Scale => {
            visual.scale = interpolate(progress, (0.0, 1.0), (0.5, 1.0));
        }
        AnimationType::FadeBlur => {
            visual.blur = interpolate(progress, (0.0, 1.0), (10.0, 0.0));
        }
    }
    visual
}

/// Frame boundaries of one word, relative to its line's sub-sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordTiming {
    /// Frame the entrance spring starts (anticipated, may be negative)
    pub start_frame: i64,
    /// Frame the word is spoken
    pub real_start_frame: i64,
    /// Frame the fade-out begins
    pub fade_out_start: f64,
    /// Frame the word is fully hidden
    pub fade_out_end: f64,
}

impl WordTiming {
    /// Timing for a word starting at `word_start` seconds inside a line
    /// starting at `line_start`, whose display window ends at `window_end`
    /// frames (line-relative).
    pub fn new(word_start: f64, line_start: f64, fps: f64, window_end: i64) -> Self {
        let real_start_frame = round_half_up((word_start - line_start) * fps) as i64;
        let fade_out_start = real_start_frame as f64 + MAX_DISPLAY_SECONDS * fps;
        let fade_out_end = (fade_out_start + FADE_OUT_DURATION_FRAMES).min(window_end as f64);

        Self {
            start_frame: real_start_frame - ANTICIPATION_FRAMES,
            real_start_frame,
            fade_out_start,
            fade_out_end,
        }
    }

    /// Frames elapsed on the entrance spring at `line_frame`, never negative
    pub fn animation_frame(&self, line_frame: i64) -> i64 {
        (line_frame - self.start_frame).max(0)
    }
}

/// Visual state of a word at `line_frame`
pub fn word_visual(animation: AnimationType, timing: &WordTiming, line_frame: i64, fps: f64) -> WordVisual {
    let frame = line_frame as f64;
    if frame >= timing.fade_out_end {
        return WordVisual::HIDDEN;
    }

    let progress = spring(timing.animation_frame(line_frame) as f64, fps);
    let visual = entrance(animation, progress);
    if frame < timing.fade_out_start {
        return visual;
    }

    let fade = (frame - timing.fade_out_start) / (timing.fade_out_end - timing.fade_out_start);
    WordVisual {
        opacity: interpolate(fade, (0.0, 1.0), (visual.opacity, 0.0)),
        blur: interpolate(fade, (0.0, 1.0), (0.0, FADE_OUT_BLUR)),
        ..visual
    }
}
