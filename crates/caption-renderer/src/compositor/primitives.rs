//! Per-frame output primitives

use crate::utils::WordTransform;
use crate::variants::TextShadow;
use caption_core::{FontStyle, FontStyleDefinition, Rgba};

/// Font a word is painted with
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FontSpec {
    /// Family name
    pub family: String,
    /// Scaled size in pixels
    pub size: f32,
    /// CSS weight
    pub weight: u16,
    /// Upright or slanted
    pub style: FontStyle,
}

impl FontSpec {
    /// Spec for `font` at the scaled `size`
    pub fn new(font: &FontStyleDefinition, size: f32) -> Self {
        Self {
            family: font.font_family.clone(),
            size,
            weight: font.font_weight,
            style: font.style(),
        }
    }
}

/// One word to draw
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WordPrimitive {
    /// Transcript position of the group
    pub group_index: usize,
    /// Line position within the group
    pub line_index: usize,
    /// Word position within the line
    pub word_index: usize,
    /// Text as painted (uppercase already applied)
    pub text: String,
    /// Horizontal center of the word box in frame pixels
    pub x: f32,
    /// Top of the word's row in frame pixels
    pub y: f32,
    /// Word box width
    pub width: f32,
    /// Row height
    pub height: f32,
    /// Font
    pub font: FontSpec,
    /// Fill color
    pub color: Rgba,
    /// Opacity; values past 1 come from spring overshoot and paint as opaque
    pub opacity: f32,
    /// Gaussian blur in pixels
    pub blur: f32,
    /// Entrance transform around the word center
    pub transform: WordTransform,
    /// Shadow stack, topmost first
    pub text_shadow: TextShadow,
}

impl WordPrimitive {
    /// Whether painting this word changes no pixel
    pub fn is_invisible(&self) -> bool {
        self.opacity <= 0.0 || self.text.trim().is_empty()
    }
}

/// Everything visible at one frame, in paint order
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FrameState {
    /// Frame index on the composition timeline
    pub frame: i64,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Words in paint order
    pub words: Vec<WordPrimitive>,
}

impl FrameState {
    /// Frame with nothing on it
    pub fn empty(frame: i64, width: u32, height: u32) -> Self {
        Self {
            frame,
            width,
            height,
            words: Vec::new(),
        }
    }

    /// Whether no visible word is present
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(WordPrimitive::is_invisible)
    }

    /// Words that change pixels
    pub fn visible_words(&self) -> impl Iterator<Item = &WordPrimitive> + '_ {
        self.words.iter().filter(|word| !word.is_invisible())
    }
}
