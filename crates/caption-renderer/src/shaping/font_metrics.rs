//! Vertical font metrics used to place glyphs inside a CSS line box

use ttf_parser::Face;

/// Ascender and descender in font units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Ascender value
    pub ascender: f32,
    /// Descender value (negative)
    pub descender: f32,
    /// Units per em
    pub units_per_em: f32,
}

impl FontMetrics {
    /// Read metrics from the face; ttf-parser already honours `USE_TYPO_METRICS`
    pub fn from_face(face: &Face) -> Self {
        Self {
            ascender: f32::from(face.ascender()),
            descender: f32::from(face.descender()),
            units_per_em: f32::from(face.units_per_em().max(1)),
        }
    }

    /// Pixels per font unit at `font_size`
    pub fn scale(&self, font_size: f32) -> f32 {
        font_size / self.units_per_em
    }

    /// Distance from the top of a line box of height `line_height` to the
    /// baseline, splitting the leading evenly above and below the content area.
    pub fn baseline(&self, font_size: f32, line_height: f32) -> f32 {
        let scale = self.scale(font_size);
        let ascent = self.ascender * scale;
        let content = (self.ascender - self.descender) * scale;
        (line_height - content) / 2.0 + ascent
    }
}
