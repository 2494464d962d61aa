//! Frame-accurate compositor for animated word-level captions
//!
//! `caption-renderer` turns a [`caption_core::Transcript`] and a resolved
//! [`caption_core::SubtitleStyleConfig`] into per-frame word primitives:
//! position, font, color, opacity, blur, transform and text-shadow for every
//! visible word. Each frame is a pure function of its index, so an
//! interactive [`PreviewSession`] and a parallel [`ExportJob`] produce the
//! same output. With the `software-backend` feature the primitives can be
//! rasterized into RGBA frames.
//!
//! ```no_run
//! use caption_core::{resolve_style, Composition, Transcript};
//! use caption_renderer::{PreviewSession, RenderContext};
//!
//! let transcript = Transcript::from_json(&std::fs::read_to_string("transcript.json")?)?;
//! let context = RenderContext::new(Composition::new(1080, 1920, 30.0, 900));
//! let mut preview = PreviewSession::new(context, transcript, resolve_style("basic", None))?;
//! let state = preview.seek(120)?;
//! println!("{} words on frame 120", state.words.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod animation;
pub mod backends;
pub mod cache;
pub mod compositor;
pub mod fonts;
pub mod layout;
pub mod metrics;
pub mod plugin;
pub mod renderer;
pub mod sequencer;
pub mod shaping;
pub mod utils;
pub mod variants;

pub use backends::{BackendType, Rasterizer};
#[cfg(feature = "software-backend")]
pub use backends::SoftwareRasterizer;
pub use cache::{CacheStats, LayoutCache};
pub use compositor::{Compositor, FontSpec, FrameState, WordPrimitive};
pub use fonts::FontRegistry;
pub use layout::{GroupLayout, LayoutParams};
pub use metrics::{CachedMeasurer, ShapingMeasurer, TextMeasurer};
pub use plugin::{LayoutPolicy, PolicyRegistry};
pub use renderer::{CancelHandle, ExportJob, ExportProgress, Frame, PreviewSession, RenderContext};
pub use sequencer::Timeline;
pub use utils::RenderError;
pub use variants::{renderer_for_style, SubtitleRenderer, VariantKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
