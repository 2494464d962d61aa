//! Batch export
//!
//! An export lays out every group before the first frame, then evaluates
//! frames in batches. With the `parallel` feature each batch is spread over
//! the rayon pool; results are handed to the sink in frame order either way.
//! Because every frame is a pure function of its index, the output matches
//! the preview frame for frame.

use super::RenderContext;
use crate::compositor::{Compositor, FrameState};
use crate::utils::RenderError;
use caption_core::{SubtitleStyleConfig, Transcript};
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Frames evaluated per batch by default
pub const DEFAULT_BATCH_SIZE: usize = 64;

/// Progress report sent after every delivered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportProgress {
    /// Frame just delivered
    pub frame: i64,
    /// Frames delivered so far
    pub done: u64,
    /// Frames in the export range
    pub total: u64,
}

/// Shared flag that stops an export between frames
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

type ProgressCallback = Box<dyn Fn(ExportProgress) + Send + Sync>;

/// Eager, batched evaluation of a frame range
pub struct ExportJob {
    compositor: Arc<Compositor>,
    batch_size: usize,
    cancel: CancelHandle,
    progress: Option<ProgressCallback>,
}

impl ExportJob {
    /// Export frames of an existing compositor
    pub fn new(compositor: Arc<Compositor>) -> Self {
        Self {
            compositor,
            batch_size: DEFAULT_BATCH_SIZE,
            cancel: CancelHandle::default(),
            progress: None,
        }
    }

    /// Build the compositor and wrap it in a job
    pub fn from_parts(
        context: RenderContext,
        transcript: Transcript,
        style: SubtitleStyleConfig,
    ) -> Result<Self, RenderError> {
        let compositor = Compositor::new(context, Arc::new(transcript), Arc::new(style))?;
        Ok(Self::new(Arc::new(compositor)))
    }

    /// Set the number of frames evaluated per batch
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Report progress after every frame
    #[must_use]
    pub fn with_progress(mut self, callback: impl Fn(ExportProgress) + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(callback));
        self
    }

    /// Handle that cancels this job from another thread
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Compositor evaluated by this job
    pub fn compositor(&self) -> &Arc<Compositor> {
        &self.compositor
    }

    /// Every frame of the composition
    pub fn frame_range(&self) -> Range<i64> {
        0..i64::from(self.compositor.context().composition().duration_in_frames)
    }

    /// Lay out every group before any frame is evaluated
    pub fn prepare(&self) -> Result<(), RenderError> {
        let groups = 0..self.compositor.transcript().len();

        #[cfg(feature = "parallel")]
        groups
            .into_par_iter()
            .try_for_each(|index| self.compositor.group_layout(index).map(drop))?;

        #[cfg(not(feature = "parallel"))]
        for index in groups {
            self.compositor.group_layout(index)?;
        }

        self.compositor.context().layout_cache().log_stats();
        Ok(())
    }

    /// Evaluate `frames`, transform each state with `map` (on worker threads
    /// when parallel) and hand results to `sink` in frame order.
    ///
    /// Returns the number of frames delivered. Cancellation is checked before
    /// every frame and surfaces as [`RenderError::Cancelled`].
    pub fn run_mapped<T, F, S>(&self, frames: Range<i64>, map: F, mut sink: S) -> Result<u64, RenderError>
    where
        T: Send,
        F: Fn(FrameState) -> Result<T, RenderError> + Sync,
        S: FnMut(T) -> Result<(), RenderError>,
    {
        self.prepare()?;

        let total = u64::try_from(frames.end.saturating_sub(frames.start)).unwrap_or(0);
        let evaluate = |frame: i64| -> Result<T, RenderError> {
            if self.cancel.is_cancelled() {
                return Err(RenderError::Cancelled(frame));
            }
            map(self.compositor.render_frame(frame)?)
        };

        let mut done = 0u64;
        let mut start = frames.start;
        while start < frames.end {
            let end = start.saturating_add(self.batch_size as i64).min(frames.end);

            #[cfg(feature = "parallel")]
            let batch: Vec<Result<T, RenderError>> = (start..end).into_par_iter().map(evaluate).collect();
            #[cfg(not(feature = "parallel"))]
            let batch: Vec<Result<T, RenderError>> = (start..end).map(evaluate).collect();

            for (frame, result) in (start..end).zip(batch) {
                sink(result?)?;
                done += 1;
                if let Some(progress) = &self.progress {
                    progress(ExportProgress { frame, done, total });
                }
            }
            start = end;
        }

        log::debug!("export delivered {done} frames");
        Ok(done)
    }

    /// Evaluate every frame of the composition
    pub fn render_all(&self) -> Result<Vec<FrameState>, RenderError> {
        let mut states = Vec::new();
        self.run_mapped(self.frame_range(), Ok, |state| {
            states.push(state);
            Ok(())
        })?;
        Ok(states)
    }
}

impl std::fmt::Debug for ExportJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportJob")
            .field("compositor", &self.compositor)
            .field("batch_size", &self.batch_size)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}
