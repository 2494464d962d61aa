//! Text measurement
//!
//! Layout only ever asks two questions: how wide is this text on one line,
//! and how tall is it once wrapped into a container. [`TextMeasurer`] answers
//! both; [`ShapingMeasurer`] does it with real font data and
//! [`CachedMeasurer`] memoizes any measurer.

mod cached;
mod shaping_measurer;

pub use cached::{CachedMeasurer, MeasureStats};
pub use shaping_measurer::ShapingMeasurer;

use crate::utils::RenderError;
use caption_core::FontStyleDefinition;

/// Line height as a multiple of the font size
pub const LINE_HEIGHT: f32 = 1.0;

/// Measures text as it would render with a given font definition.
///
/// Implementations apply the definition's uppercase transform before
/// measuring and must be deterministic: the same text and font always yield
/// bit-identical results.
pub trait TextMeasurer: Send + Sync {
    /// Width of `text` on a single line at the definition's base size
    fn measure_width(&self, text: &str, font: &FontStyleDefinition) -> Result<f32, RenderError>;

    /// Width of `text` at the base size multiplied by `font_scale`
    fn measure_scaled_width(
        &self,
        text: &str,
        font: &FontStyleDefinition,
        font_scale: f32,
    ) -> Result<f32, RenderError> {
        Ok(self.measure_width(text, font)? * font_scale)
    }

    /// Height of `text` wrapped at whitespace into `container_width`, with the
    /// font scaled by `font_scale`
    fn measure_wrapped_height(
        &self,
        text: &str,
        font: &FontStyleDefinition,
        container_width: f32,
        font_scale: f32,
    ) -> Result<f32, RenderError> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let wrapped = wrap_words(self, &words, font, container_width, font_scale)?;
        Ok(wrapped.height())
    }
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for std::sync::Arc<M> {
    fn measure_width(&self, text: &str, font: &FontStyleDefinition) -> Result<f32, RenderError> {
        (**self).measure_width(text, font)
    }
}

/// One visual row produced by wrapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrappedRow {
    /// Index of the first word on this row
    pub first_word: usize,
    /// Number of words on this row
    pub word_count: usize,
    /// Row width including inner spaces
    pub width: f32,
}

/// Result of wrapping a sequence of words
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedText {
    /// Rows top to bottom
    pub rows: Vec<WrappedRow>,
    /// Scaled width of every word
    pub word_widths: Vec<f32>,
    /// Scaled width of one space
    pub space_width: f32,
    /// Height of every row
    pub row_height: f32,
}

impl WrappedText {
    /// Total height of all rows
    pub fn height(&self) -> f32 {
        self.rows.len() as f32 * self.row_height
    }
}

/// Greedy whitespace wrapping: a word moves to the next row when it would
/// overflow `container_width`; a word wider than the container sits alone.
pub fn wrap_words<M: TextMeasurer + ?Sized>(
    measurer: &M,
    words: &[&str],
    font: &FontStyleDefinition,
    container_width: f32,
    font_scale: f32,
) -> Result<WrappedText, RenderError> {
    let space_width = measurer.measure_scaled_width(" ", font, font_scale)?;
    let word_widths = words
        .iter()
        .map(|word| measurer.measure_scaled_width(word, font, font_scale))
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows: Vec<WrappedRow> = Vec::new();
    for (index, &width) in word_widths.iter().enumerate() {
        match rows.last_mut() {
            Some(row) if row.width + space_width + width <= container_width => {
                row.width += space_width + width;
                row.word_count += 1;
            }
            _ => rows.push(WrappedRow {
                first_word: index,
                word_count: 1,
                width,
            }),
        }
    }

    Ok(WrappedText {
        rows,
        word_widths,
        space_width,
        row_height: font.font_size * font_scale * LINE_HEIGHT,
    })
}

/// Font-free measurer for tests and benchmarks
#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use super::*;

    /// Deterministic measurer: spaces 0.25em, capitals and digits 0.75em,
    /// everything else 0.5em
    #[derive(Debug, Default, Clone, Copy)]
    pub struct FixedAdvanceMeasurer;

    impl TextMeasurer for FixedAdvanceMeasurer {
        fn measure_width(&self, text: &str, font: &FontStyleDefinition) -> Result<f32, RenderError> {
            let text = font.transform_text(text);
            let em: f32 = text
                .chars()
                .map(|c| match c {
                    ' ' => 0.25,
                    c if c.is_uppercase() || c.is_ascii_digit() => 0.75,
                    _ => 0.5,
                })
                .sum();
            Ok(em * font.font_size)
        }
    }
}
