//! Interactive preview
//!
//! A preview evaluates one frame at a time, on demand, in whatever order the
//! user scrubs. Nothing is laid out until a frame needs it. Editing the
//! transcript or style rebuilds the compositor but keeps the shared layout
//! cache, so untouched groups are not measured again.

use super::RenderContext;
use crate::compositor::{Compositor, FrameState};
use crate::utils::RenderError;
use caption_core::{Composition, SubtitleStyleConfig, Transcript};
use std::sync::Arc;

/// Seekable, lazily evaluated preview of a captioned video
#[derive(Debug)]
pub struct PreviewSession {
    compositor: Arc<Compositor>,
    position: i64,
}

impl PreviewSession {
    /// Open a preview positioned at frame 0
    pub fn new(
        context: RenderContext,
        transcript: Transcript,
        style: SubtitleStyleConfig,
    ) -> Result<Self, RenderError> {
        let compositor = Compositor::new(context, Arc::new(transcript), Arc::new(style))?;
        Ok(Self {
            compositor: Arc::new(compositor),
            position: 0,
        })
    }

    /// Compositor backing the preview
    pub fn compositor(&self) -> &Arc<Compositor> {
        &self.compositor
    }

    /// Current frame index
    pub fn position(&self) -> i64 {
        self.position
    }

    /// Last frame of the composition
    pub fn last_frame(&self) -> i64 {
        i64::from(self.compositor.context().composition().duration_in_frames).saturating_sub(1)
    }

    /// Move to `frame` and evaluate it
    pub fn seek(&mut self, frame: i64) -> Result<FrameState, RenderError> {
        let frame = frame.clamp(0, self.last_frame().max(0));
        self.position = frame;
        self.compositor.render_frame(frame)
    }

    /// Evaluate the current frame again
    pub fn current(&self) -> Result<FrameState, RenderError> {
        self.compositor.render_frame(self.position)
    }

    /// Advance one frame, `None` past the end
    pub fn step(&mut self) -> Option<Result<FrameState, RenderError>> {
        if self.position >= self.last_frame() {
            return None;
        }
        self.position += 1;
        Some(self.compositor.render_frame(self.position))
    }

    /// Replace the transcript
    pub fn set_transcript(&mut self, transcript: Transcript) -> Result<(), RenderError> {
        self.rebuild(
            self.compositor.context().clone(),
            Arc::new(transcript),
            Arc::clone(self.compositor.style()),
        )
    }

    /// Replace the style
    pub fn set_style(&mut self, style: SubtitleStyleConfig) -> Result<(), RenderError> {
        self.rebuild(
            self.compositor.context().clone(),
            Arc::clone(self.compositor.transcript()),
            Arc::new(style),
        )
    }

    /// Replace the composition (new video dimensions or frame rate)
    pub fn set_composition(&mut self, composition: Composition) -> Result<(), RenderError> {
        self.rebuild(
            self.compositor.context().clone().with_composition(composition),
            Arc::clone(self.compositor.transcript()),
            Arc::clone(self.compositor.style()),
        )
    }

    fn rebuild(
        &mut self,
        context: RenderContext,
        transcript: Arc<Transcript>,
        style: Arc<SubtitleStyleConfig>,
    ) -> Result<(), RenderError> {
        self.compositor = Arc::new(Compositor::new(context, transcript, style)?);
        self.position = self.position.clamp(0, self.last_frame().max(0));
        log::debug!("preview rebuilt at frame {}", self.position);
        Ok(())
    }
}
