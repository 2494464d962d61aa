//! Render front ends: shared context, preview sessions, exports and frames

mod context;
mod export;
mod frame;
mod session;

pub use context::{RenderContext, DEFAULT_FONT_WAIT};
pub use export::{CancelHandle, ExportJob, ExportProgress, DEFAULT_BATCH_SIZE};
pub use frame::Frame;
pub use session::PreviewSession;
