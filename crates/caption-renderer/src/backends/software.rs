//! Software rasterizer using tiny-skia
//!
//! Paints a [`FrameState`] the way a browser paints the equivalent DOM: each
//! word is drawn into its own layer (shadow stack, then the fill, then the
//! word's blur filter) and the layer is composited with the word's opacity.

use super::blur::GaussianBlur;
use super::{BackendType, Rasterizer};
use crate::compositor::{FrameState, WordPrimitive};
use crate::fonts::FontRegistry;
use crate::renderer::Frame;
use crate::shaping::{shape_text, ShapedText};
use crate::utils::RenderError;
use caption_core::{FontStyleDefinition, Rgba};
use std::sync::Arc;
use tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Transform};

/// CPU rasterizer for compositor output
#[derive(Debug, Clone)]
pub struct SoftwareRasterizer {
    fonts: Arc<FontRegistry>,
}

impl SoftwareRasterizer {
    /// Create a rasterizer drawing glyphs from `fonts`
    pub fn new(fonts: Arc<FontRegistry>) -> Self {
        Self { fonts }
    }

    /// Font registry glyphs come from
    pub fn fonts(&self) -> &Arc<FontRegistry> {
        &self.fonts
    }

    fn draw_word(&self, pixmap: &mut Pixmap, word: &WordPrimitive) -> Result<(), RenderError> {
        let Some(path) = self.word_path(word)? else {
            return Ok(());
        };

        // Room for the farthest-reaching shadow and the word's own blur.
        let shadow_reach = word
            .text_shadow
            .iter()
            .map(|layer| layer.offset_x.abs().max(layer.offset_y.abs()) + 1.5 * layer.blur)
            .fold(0.0f32, f32::max);
        let margin = (shadow_reach + 3.0 * word.blur + 2.0).ceil();

        let bounds = path.bounds();
        let left = (bounds.left() - margin).floor().max(0.0);
        let top = (bounds.top() - margin).floor().max(0.0);
        let right = (bounds.right() + margin).ceil().min(pixmap.width() as f32);
        let bottom = (bounds.bottom() + margin).ceil().min(pixmap.height() as f32);
        if right <= left || bottom <= top {
            return Ok(());
        }

        let (layer_width, layer_height) = ((right - left) as u32, (bottom - top) as u32);
        let mut layer = Pixmap::new(layer_width, layer_height).ok_or(RenderError::InvalidPixmap)?;
        let to_layer = Transform::from_translate(-left, -top);

        // Bottom of the stack first
        for shadow in word.text_shadow.iter().rev() {
            let offset = to_layer.post_translate(shadow.offset_x, shadow.offset_y);
            let paint = paint_for(shadow.color);
            if shadow.blur <= 0.0 {
                layer.fill_path(&path, &paint, FillRule::Winding, offset, None);
                continue;
            }
            let mut blurred = Pixmap::new(layer_width, layer_height).ok_or(RenderError::InvalidPixmap)?;
            blurred.fill_path(&path, &paint, FillRule::Winding, offset, None);
            GaussianBlur::from_sigma(shadow.blur / 2.0).apply(&mut blurred);
            layer.draw_pixmap(0, 0, blurred.as_ref(), &PixmapPaint::default(), Transform::identity(), None);
        }

        layer.fill_path(&path, &paint_for(word.color), FillRule::Winding, to_layer, None);

        if word.blur > 0.0 {
            GaussianBlur::from_sigma(word.blur).apply(&mut layer);
        }

        let paint = PixmapPaint {
            opacity: word.opacity.clamp(0.0, 1.0),
            ..PixmapPaint::default()
        };
        pixmap.draw_pixmap(left as i32, top as i32, layer.as_ref(), &paint, Transform::identity(), None);
        Ok(())
    }

    /// Glyph outlines of `word` in frame coordinates, transform applied
    fn word_path(&self, word: &WordPrimitive) -> Result<Option<Path>, RenderError> {
        let font = FontStyleDefinition::new(word.font.size, word.font.weight, word.font.family.clone())
            .with_style(word.font.style);
        let shaped = shape_text(&self.fonts, &word.text, &font)?;

        let size = word.font.size;
        let baseline = shaped.metrics.baseline(size, word.height);
        let start_x = (word.width - shaped.width(size)) / 2.0;

        let builder = self
            .fonts
            .with_face_data(shaped.font_id, |data, index| {
                build_outline(data, index, &shaped, size, start_x, baseline)
            })
            .ok_or_else(|| RenderError::FontError(format!("Failed to load font data for '{}'", word.font.family)))??;

        let Some(path) = builder.finish() else {
            return Ok(None);
        };

        // Scale and translate around the word center
        let transform = Transform::from_translate(
            word.x + word.transform.translate_x,
            word.y + word.height / 2.0 + word.transform.translate_y,
        )
        .pre_scale(word.transform.scale, word.transform.scale)
        .pre_translate(-word.width / 2.0, -word.height / 2.0);

        Ok(path.transform(transform))
    }
}

impl Rasterizer for SoftwareRasterizer {
    fn backend_type(&self) -> BackendType {
        BackendType::Software
    }

    fn rasterize(&self, state: &FrameState) -> Result<Frame, RenderError> {
        let mut pixmap = Pixmap::new(state.width, state.height).ok_or(RenderError::InvalidDimensions)?;

        for word in state.visible_words() {
            match self.draw_word(&mut pixmap, word) {
                Ok(()) => {}
                Err(err) if err.is_recoverable() => {
                    log::warn!("skipping word '{}' at frame {}: {err}", word.text, state.frame);
                }
                Err(err) => return Err(err),
            }
        }

        let mut buffer = Vec::with_capacity(pixmap.data().len());
        for pixel in pixmap.pixels() {
            let color = pixel.demultiply();
            buffer.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
        }
        Frame::from_rgba(buffer, state.width, state.height, state.frame)
    }
}

fn paint_for(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

/// Outline builder converting ttf-parser outlines to tiny-skia paths
struct GlyphOutline {
    builder: PathBuilder,
    scale: f32,
    origin_x: f32,
    origin_y: f32,
}

impl GlyphOutline {
    fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (self.origin_x + x * self.scale, self.origin_y - y * self.scale)
    }
}

impl ttf_parser::OutlineBuilder for GlyphOutline {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x, y) = self.point(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x2, y2) = self.point(x2, y2);
        let (x, y) = self.point(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

fn build_outline(
    data: &[u8],
    index: u32,
    shaped: &ShapedText,
    size: f32,
    start_x: f32,
    baseline: f32,
) -> Result<PathBuilder, RenderError> {
    let face = ttf_parser::Face::parse(data, index)
        .map_err(|e| RenderError::FontError(format!("Failed to parse font: {e}")))?;
    let scale = shaped.metrics.scale(size);

    let mut outline = GlyphOutline {
        builder: PathBuilder::new(),
        scale,
        origin_x: 0.0,
        origin_y: 0.0,
    };
    for glyph in &shaped.glyphs {
        outline.origin_x = start_x + (glyph.x_position + i64::from(glyph.x_offset)) as f32 * scale;
        outline.origin_y = baseline - glyph.y_offset as f32 * scale;
        face.outline_glyph(ttf_parser::GlyphId(glyph.glyph_id), &mut outline);
    }
    Ok(outline.builder)
}
