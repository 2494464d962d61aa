//! Renderer variants
//!
//! All caption styles share measurement, layout, animation and sequencing.
//! They differ only in how a word is painted: where its glow color comes
//! from, whether the outline ring is drawn, how rows align and which ambient
//! shadow sits under the text. [`VariantParams`] captures those knobs and
//! [`SubtitleRenderer`] turns them into per-word paint.

use crate::layout::{LINE_SPACING, MAX_FONT_SIZE};
use caption_core::{FontStyleDefinition, Rgba};
use smallvec::SmallVec;
use std::sync::Arc;

/// One entry of a CSS-style text-shadow list
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ShadowLayer {
    /// Horizontal offset in pixels
    pub offset_x: f32,
    /// Vertical offset in pixels
    pub offset_y: f32,
    /// Blur radius in pixels
    pub blur: f32,
    /// Shadow color
    pub color: Rgba,
}

impl ShadowLayer {
    /// Create a shadow layer
    pub const fn new(offset_x: f32, offset_y: f32, blur: f32, color: Rgba) -> Self {
        Self {
            offset_x,
            offset_y,
            blur,
            color,
        }
    }
}

/// Text-shadow list; the first layer paints on top
pub type TextShadow = SmallVec<[ShadowLayer; 8]>;

/// Horizontal alignment of rows inside the caption container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TextAlign {
    /// Rows centered in the container
    #[default]
    Center,
    /// Rows flush against the container's left edge
    Left,
}

/// Where the glow color comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlowSource {
    /// The definition's `shadowColor`
    ShadowColor,
    /// The text fill color
    TextColor,
}

/// Known renderer variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum VariantKind {
    /// Width-equalized lines with outline and soft shadow
    EqualWidth,
    /// Glow tinted with the text color, no outline
    GradientBase,
    /// Outlined text with a light shadow
    CombinedAnimation,
    /// Stacked lines, centered
    ThreeLines,
    /// Stacked lines, left aligned
    ThreeLinesWithLeftMargin,
}

impl VariantKind {
    /// Every variant
    pub const ALL: [Self; 5] = [
        Self::EqualWidth,
        Self::GradientBase,
        Self::CombinedAnimation,
        Self::ThreeLines,
        Self::ThreeLinesWithLeftMargin,
    ];

    /// Variant that paints the style with `style_id`; unknown ids paint like `basic`
    pub fn for_style_id(style_id: &str) -> Self {
        match style_id {
            "gradient" => Self::GradientBase,
            "combined-animation" | "combo" => Self::CombinedAnimation,
            "three-lines" => Self::ThreeLines,
            "three-lines-left" => Self::ThreeLinesWithLeftMargin,
            _ => Self::EqualWidth,
        }
    }

    /// Paint parameters of this variant
    pub fn params(self) -> VariantParams {
        let black = |alpha: f32| Rgba::BLACK.with_alpha(alpha);
        let base = VariantParams {
            align: TextAlign::Center,
            glow_source: GlowSource::ShadowColor,
            apply_stroke: true,
            ambient_shadow: ShadowLayer::new(2.0, 2.0, 4.0, black(0.6)),
            max_font_size: MAX_FONT_SIZE,
            line_spacing: LINE_SPACING,
        };

        match self {
            Self::EqualWidth => base,
            Self::GradientBase => VariantParams {
                glow_source: GlowSource::TextColor,
                apply_stroke: false,
                ambient_shadow: ShadowLayer::new(3.0, 3.0, 6.0, black(0.9)),
                ..base
            },
            Self::CombinedAnimation => VariantParams {
                ambient_shadow: ShadowLayer::new(2.0, 2.0, 3.0, black(0.4)),
                ..base
            },
            Self::ThreeLines => VariantParams {
                ambient_shadow: ShadowLayer::new(2.0, 2.0, 4.0, black(0.8)),
                ..base
            },
            Self::ThreeLinesWithLeftMargin => VariantParams {
                align: TextAlign::Left,
                ambient_shadow: ShadowLayer::new(2.0, 2.0, 4.0, black(0.8)),
                ..base
            },
        }
    }
}

/// Paint knobs that distinguish the variants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantParams {
    /// Row alignment
    pub align: TextAlign,
    /// Glow color source
    pub glow_source: GlowSource,
    /// Whether `strokeWeight` draws an outline ring
    pub apply_stroke: bool,
    /// Shadow under every word
    pub ambient_shadow: ShadowLayer,
    /// Largest scaled font size a line may reach
    pub max_font_size: f32,
    /// Extra vertical gap between stacked lines
    pub line_spacing: f32,
}

/// Offsets of the outline ring for a stroke of `radius` pixels: the 8
/// neighbours on a 3x3 ring for radius 1 or less, otherwise the 24 cells of a
/// 5x5 grid stepped at `radius / 2`.
pub fn outline_offsets(radius: f32) -> SmallVec<[(f32, f32); 24]> {
    let (reach, step) = if radius <= 1.0 { (1, radius) } else { (2, radius / 2.0) };
    let mut offsets = SmallVec::new();
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            if dx != 0 || dy != 0 {
                offsets.push((dx as f32 * step, dy as f32 * step));
            }
        }
    }
    offsets
}

/// The paint step of a caption style
pub trait SubtitleRenderer: Send + Sync {
    /// Variant implemented
    fn kind(&self) -> VariantKind;

    /// Paint parameters
    fn params(&self) -> &VariantParams;

    /// Fill color of a word
    fn fill_color(&self, font: &FontStyleDefinition) -> Rgba {
        font.fill_color()
    }

    /// Text-shadow list of a word: outline ring on top, then glow, then the
    /// ambient shadow at the bottom
    fn text_shadow(&self, font: &FontStyleDefinition) -> TextShadow {
        let params = self.params();
        let mut layers = TextShadow::new();

        if params.apply_stroke {
            if let Some(weight) = font.stroke_weight {
                let color = Rgba::parse_or(font.stroke_color.as_deref(), Rgba::BLACK);
                for (dx, dy) in outline_offsets(weight.radius()) {
                    layers.push(ShadowLayer::new(dx, dy, 0.0, color));
                }
            }
        }

        if let Some(radius) = font.shadow.and_then(|size| size.glow_radius()) {
            let color = match params.glow_source {
                GlowSource::ShadowColor => Rgba::parse_or(font.shadow_color.as_deref(), Rgba::WHITE),
                GlowSource::TextColor => self.fill_color(font),
            };
            layers.push(ShadowLayer::new(0.0, 0.0, radius, color));
        }

        layers.push(params.ambient_shadow);
        layers
    }
}

/// Parameter-driven renderer used for every built-in variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantRenderer {
    kind: VariantKind,
    params: VariantParams,
}

impl VariantRenderer {
    /// Renderer for `kind` with its default parameters
    pub fn new(kind: VariantKind) -> Self {
        Self::with_params(kind, kind.params())
    }

    /// Renderer for `kind` with custom parameters
    pub fn with_params(kind: VariantKind, params: VariantParams) -> Self {
        Self { kind, params }
    }
}

impl SubtitleRenderer for VariantRenderer {
    fn kind(&self) -> VariantKind {
        self.kind
    }

    fn params(&self) -> &VariantParams {
        &self.params
    }
}

/// Renderer for the style with `style_id`
pub fn renderer_for_style(style_id: &str) -> Arc<dyn SubtitleRenderer> {
    Arc::new(VariantRenderer::new(VariantKind::for_style_id(style_id)))
}
