//! # caption-core
//!
//! Data model and style resolution for word-level animated captions.
//!
//! A transcript is a list of [`Group`]s (one caption "screen" each), every group
//! holds ordered [`Line`]s and every line holds timed [`Word`]s. The visual side is
//! described by a [`SubtitleStyleConfig`], which maps each [`FontType`] to a full
//! [`FontStyleDefinition`]. Styles are resolved from a named preset plus an
//! optional per-video [`StyleOverride`].
//!
//! This crate has no rendering logic. It is the input contract consumed by
//! `caption-renderer`.
//!
//! ## Quick Start
//!
//! ```rust
//! use caption_core::{resolve_style, FontType, Transcript};
//!
//! let json = r#"[
//!   {"id": "g1", "startTime": 0.0, "endTime": 1.2, "lines": [
//!     {"id": "l1", "startTime": 0.0, "endTime": 1.2, "fontType": "bold", "words": [
//!       {"id": "w1", "text": "Hello", "startTime": 0.0, "endTime": 0.5},
//!       {"id": "w2", "text": "world", "startTime": 0.6, "endTime": 1.2}
//!     ]}
//!   ]}
//! ]"#;
//!
//! let transcript = Transcript::from_json(json)?;
//! assert_eq!(transcript.groups()[0].lines[0].text(), "Hello world");
//!
//! let style = resolve_style("basic", None);
//! assert_eq!(style.fonts.get(FontType::Bold).font_family, "Arial");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod composition;
pub mod style;
pub mod transcript;
pub mod utils;

pub use composition::{frame_at, Composition};
pub use style::{
    resolve_style, AnimationType, FontMap, FontStyle, FontStyleDefinition, FontType,
    PartialFontMap, ShadowSize, StrokeWeight, StyleOverride, SubtitleStyleConfig,
};
pub use transcript::{Group, Line, Transcript, TranscriptIssue, Word};
pub use utils::{CoreError, Result, Rgba};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
