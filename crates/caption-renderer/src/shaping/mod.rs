//! Text shaping module using rustybuzz

mod font_metrics;
pub use font_metrics::FontMetrics;

use crate::fonts::FontRegistry;
use crate::utils::RenderError;
use caption_core::FontStyleDefinition;
use fontdb::ID as FontId;
use rustybuzz::{Face, UnicodeBuffer};

/// Shaped glyph representation, positions in font units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapedGlyph {
    /// Glyph ID in the font
    pub glyph_id: u16,
    /// Pen position before this glyph
    pub x_position: i64,
    /// X offset
    pub x_offset: i32,
    /// Y offset
    pub y_offset: i32,
    /// Horizontal advance
    pub x_advance: i32,
}

/// Shaped text result
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedText {
    /// Face the text was shaped with
    pub font_id: FontId,
    /// Shaped glyphs
    pub glyphs: Vec<ShapedGlyph>,
    /// Sum of advances in font units
    pub advance_units: i64,
    /// Vertical metrics of the face
    pub metrics: FontMetrics,
}

impl ShapedText {
    /// Horizontal advance in pixels at `font_size`
    pub fn width(&self, font_size: f32) -> f32 {
        self.advance_units as f32 * self.metrics.scale(font_size)
    }
}

/// Resolve the face used for `font`, failing when the family is not registered
pub fn find_font(registry: &FontRegistry, font: &FontStyleDefinition) -> Result<FontId, RenderError> {
    registry
        .query(&font.font_family, font.font_weight, font.style())
        .ok_or_else(|| RenderError::FontNotLoaded(font.font_family.clone()))
}

/// Shape already-transformed `text` with the face selected by `font`
pub fn shape_text(
    registry: &FontRegistry,
    text: &str,
    font: &FontStyleDefinition,
) -> Result<ShapedText, RenderError> {
    let font_id = find_font(registry, font)?;

    registry
        .with_face_data(font_id, |data, index| shape_with_face(data, index, text, font_id))
        .ok_or_else(|| {
            RenderError::FontError(format!("Failed to load font data for '{}'", font.font_family))
        })?
}

fn shape_with_face(
    data: &[u8],
    index: u32,
    text: &str,
    font_id: FontId,
) -> Result<ShapedText, RenderError> {
    let face = Face::from_slice(data, index)
        .ok_or_else(|| RenderError::FontError("Failed to create font face".to_string()))?;
    let ttf_face = ttf_parser::Face::parse(data, index)
        .map_err(|e| RenderError::FontError(format!("Failed to parse font for metrics: {e}")))?;
    let metrics = FontMetrics::from_face(&ttf_face);

    let mut buffer = UnicodeBuffer::new();
    buffer.push_str(text);
    let output = rustybuzz::shape(&face, &[], buffer);

    let mut glyphs = Vec::with_capacity(output.len());
    let mut pen = 0i64;
    for (info, pos) in output.glyph_infos().iter().zip(output.glyph_positions()) {
        let glyph_id = u16::try_from(info.glyph_id)
            .map_err(|_| RenderError::ShapingError(format!("glyph id {} out of range", info.glyph_id)))?;
        glyphs.push(ShapedGlyph {
            glyph_id,
            x_position: pen,
            x_offset: pos.x_offset,
            y_offset: pos.y_offset,
            x_advance: pos.x_advance,
        });
        pen += i64::from(pos.x_advance);
    }

    Ok(ShapedText {
        font_id,
        glyphs,
        advance_units: pen,
        metrics,
    })
}
