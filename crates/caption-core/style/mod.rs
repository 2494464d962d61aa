//! Caption style definitions and resolution
//!
//! A [`SubtitleStyleConfig`] maps every [`FontType`] to a complete
//! [`FontStyleDefinition`]. Styles are persisted per video as a named preset
//! id plus an optional [`StyleOverride`]; [`resolve_style`] turns the pair into
//! the concrete configuration the renderer consumes.

mod presets;
mod resolver;

pub use presets::{named_style, StyleTemplate, BASIC_STYLE_ID, PRESET_IDS};
pub use resolver::resolve_style;

use crate::utils::Rgba;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::OnceLock;

/// Typography slot a line is rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontType {
    /// Emphasis slot
    Bold,
    /// Light slot
    Thin,
    /// Regular slot
    #[default]
    Normal,
    /// Slanted slot
    Italic,
    /// Any slot name this version does not know; rendered with the built-in default font
    #[serde(other)]
    Unknown,
}

impl FontType {
    /// The four slots every resolved style populates
    pub const ALL: [Self; 4] = [Self::Bold, Self::Thin, Self::Normal, Self::Italic];

    /// Slot name as it appears in JSON
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Thin => "thin",
            Self::Normal => "normal",
            Self::Italic => "italic",
            Self::Unknown => "unknown",
        }
    }
}

/// CSS font-style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    /// Upright
    #[default]
    Normal,
    /// Italic face
    Italic,
    /// Slanted regular face
    Oblique,
}

/// Outline thickness faked through stacked text shadows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeWeight {
    /// 1px ring
    Thin,
    /// 2px ring
    Medium,
    /// 3px ring
    Thick,
}

impl StrokeWeight {
    /// Ring radius in pixels
    pub fn radius(self) -> f32 {
        match self {
            Self::Thin => 1.0,
            Self::Medium => 2.0,
            Self::Thick => 3.0,
        }
    }
}

/// Glow size built from a blurred, non-offset text shadow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowSize {
    /// No glow
    #[default]
    None,
    /// 10px glow
    Small,
    /// 20px glow
    Medium,
    /// 30px glow
    Large,
}

impl ShadowSize {
    /// Glow blur radius in pixels, `None` when disabled
    pub fn glow_radius(self) -> Option<f32> {
        match self {
            Self::None => None,
            Self::Small => Some(10.0),
            Self::Medium => Some(20.0),
            Self::Large => Some(30.0),
        }
    }
}

/// Entrance animation archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationType {
    /// Rise into place from below
    SlideUp,
    /// Drop into place from above
    SlideDown,
    /// Enter from the right moving left
    SlideLeft,
    /// Enter from the left moving right
    SlideRight,
    /// Grow from half size
    Scale,
    /// Sharpen from a heavy blur
    FadeBlur,
}

impl AnimationType {
    /// Fixed archetype order used as the shuffle input
    pub const ALL: [Self; 6] = [
        Self::SlideUp,
        Self::SlideDown,
        Self::SlideLeft,
        Self::SlideRight,
        Self::Scale,
        Self::FadeBlur,
    ];

    /// Archetype name as it appears in JSON
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SlideUp => "slide-up",
            Self::SlideDown => "slide-down",
            Self::SlideLeft => "slide-left",
            Self::SlideRight => "slide-right",
            Self::Scale => "scale",
            Self::FadeBlur => "fade-blur",
        }
    }
}

/// Complete typography for one font slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontStyleDefinition {
    /// Base font size in pixels
    pub font_size: f32,
    /// CSS weight (100..=900)
    #[serde(deserialize_with = "weight_from_any")]
    pub font_weight: u16,
    /// Font family name
    pub font_family: String,
    /// Upright or italic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    /// Fill color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Render text uppercased
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uppercase: Option<bool>,
    /// Outline ring size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_weight: Option<StrokeWeight>,
    /// Outline color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    /// Glow size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<ShadowSize>,
    /// Glow color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_color: Option<String>,
    /// Pins lines of this slot to one archetype instead of the seeded assignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_type: Option<AnimationType>,
}

impl FontStyleDefinition {
    /// Create a definition with only the required fields set
    pub fn new(font_size: f32, font_weight: u16, font_family: impl Into<String>) -> Self {
        Self {
            font_size,
            font_weight,
            font_family: font_family.into(),
            font_style: None,
            color: None,
            uppercase: None,
            stroke_weight: None,
            stroke_color: None,
            shadow: None,
            shadow_color: None,
            animation_type: None,
        }
    }

    /// Built-in default used when a slot is missing everywhere
    pub fn fallback() -> &'static Self {
        static FALLBACK: OnceLock<FontStyleDefinition> = OnceLock::new();
        FALLBACK.get_or_init(Self::default)
    }

    /// Set the font style
    #[must_use]
    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.font_style = Some(style);
        self
    }

    /// Set the fill color
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Enable uppercase rendering
    #[must_use]
    pub fn uppercased(mut self) -> Self {
        self.uppercase = Some(true);
        self
    }

    /// Set the outline ring
    #[must_use]
    pub fn with_stroke(mut self, weight: StrokeWeight, color: impl Into<String>) -> Self {
        self.stroke_weight = Some(weight);
        self.stroke_color = Some(color.into());
        self
    }

    /// Set the glow
    #[must_use]
    pub fn with_glow(mut self, size: ShadowSize, color: impl Into<String>) -> Self {
        self.shadow = Some(size);
        self.shadow_color = Some(color.into());
        self
    }

    /// Pin an animation archetype
    #[must_use]
    pub fn with_animation(mut self, animation: AnimationType) -> Self {
        self.animation_type = Some(animation);
        self
    }

    /// Whether text is uppercased before measuring and painting
    pub fn is_uppercase(&self) -> bool {
        self.uppercase.unwrap_or(false)
    }

    /// Resolved font style
    pub fn style(&self) -> FontStyle {
        self.font_style.unwrap_or_default()
    }

    /// Fill color, white when unset or unparsable
    pub fn fill_color(&self) -> Rgba {
        Rgba::parse_or(self.color.as_deref(), Rgba::WHITE)
    }

    /// Apply the uppercase transform if enabled
    pub fn transform_text<'a>(&self, text: &'a str) -> std::borrow::Cow<'a, str> {
        if self.is_uppercase() {
            std::borrow::Cow::Owned(text.to_uppercase())
        } else {
            std::borrow::Cow::Borrowed(text)
        }
    }
}

impl Default for FontStyleDefinition {
    fn default() -> Self {
        Self::new(60.0, 400, "Arial").with_color("#ffffff")
    }
}

/// Fully populated font slots of a resolved style
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FontMap {
    /// Bold slot
    pub bold: FontStyleDefinition,
    /// Thin slot
    pub thin: FontStyleDefinition,
    /// Normal slot
    pub normal: FontStyleDefinition,
    /// Italic slot
    pub italic: FontStyleDefinition,
}

impl FontMap {
    /// Definition governing `font_type`; unknown slots use the built-in default
    pub fn get(&self, font_type: FontType) -> &FontStyleDefinition {
        match font_type {
            FontType::Bold => &self.bold,
            FontType::Thin => &self.thin,
            FontType::Normal => &self.normal,
            FontType::Italic => &self.italic,
            FontType::Unknown => FontStyleDefinition::fallback(),
        }
    }
}

/// Font slots of a style template or override; absent slots defer to the base
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialFontMap {
    /// Bold slot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<FontStyleDefinition>,
    /// Thin slot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thin: Option<FontStyleDefinition>,
    /// Normal slot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<FontStyleDefinition>,
    /// Italic slot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<FontStyleDefinition>,
}

impl PartialFontMap {
    /// Slot lookup; `Unknown` is never stored
    pub fn get(&self, font_type: FontType) -> Option<&FontStyleDefinition> {
        match font_type {
            FontType::Bold => self.bold.as_ref(),
            FontType::Thin => self.thin.as_ref(),
            FontType::Normal => self.normal.as_ref(),
            FontType::Italic => self.italic.as_ref(),
            FontType::Unknown => None,
        }
    }

    /// Set a slot
    pub fn set(&mut self, font_type: FontType, definition: FontStyleDefinition) {
        match font_type {
            FontType::Bold => self.bold = Some(definition),
            FontType::Thin => self.thin = Some(definition),
            FontType::Normal => self.normal = Some(definition),
            FontType::Italic => self.italic = Some(definition),
            FontType::Unknown => {}
        }
    }
}

/// Concrete style consumed by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleStyleConfig {
    /// Style id (also selects the renderer variant)
    pub id: String,
    /// Display name
    pub name: String,
    /// Catalog category
    pub category: String,
    /// Top padding in pixels applied before line stacking
    #[serde(default)]
    pub caption_padding: u32,
    /// Typography per font slot
    pub fonts: FontMap,
}

impl SubtitleStyleConfig {
    /// Decode a complete style from JSON
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Per-video partial style. Config-level fields replace the base's when set;
/// each font slot replaces the base slot as a whole.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOverride {
    /// Replacement id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Replacement name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Replacement top padding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption_padding: Option<u32>,
    /// Replacement font slots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fonts: Option<PartialFontMap>,
}

impl StyleOverride {
    /// Decode an override from JSON
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Accept CSS weights as numbers, numeric strings or `normal`/`bold`
fn weight_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawWeight {
        Number(f64),
        Text(String),
    }

    match RawWeight::deserialize(deserializer)? {
        RawWeight::Number(n) => Ok(n.clamp(1.0, 1000.0) as u16),
        RawWeight::Text(s) => match s.trim() {
            "normal" => Ok(400),
            "bold" => Ok(700),
            "lighter" => Ok(300),
            "bolder" => Ok(800),
            other => other
                .parse::<u16>()
                .map_err(|_| serde::de::Error::custom(format!("invalid font weight: {other}"))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_matches_hard_coded_default() {
        let fallback = FontStyleDefinition::fallback();
        assert_eq!(fallback.font_size, 60.0);
        assert_eq!(fallback.font_weight, 400);
        assert_eq!(fallback.font_family, "Arial");
        assert_eq!(fallback.color.as_deref(), Some("#ffffff"));
    }

    #[test]
    fn unknown_slot_uses_fallback() {
        let fonts = FontMap {
            bold: FontStyleDefinition::new(90.0, 900, "Impact"),
            ..FontMap::default()
        };
        assert_eq!(fonts.get(FontType::Unknown), FontStyleDefinition::fallback());
        assert_eq!(fonts.get(FontType::Bold).font_family, "Impact");
    }

    #[test]
    fn weights_decode_from_strings_and_numbers() {
        let json = r#"{"fontSize": 40, "fontWeight": "bold", "fontFamily": "Inter"}"#;
        let def: FontStyleDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.font_weight, 700);

        let json = r#"{"fontSize": 40, "fontWeight": "600", "fontFamily": "Inter"}"#;
        let def: FontStyleDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.font_weight, 600);

        let json = r#"{"fontSize": 40, "fontWeight": 300, "fontFamily": "Inter"}"#;
        let def: FontStyleDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.font_weight, 300);
    }

    #[test]
    fn enums_use_css_names() {
        let json = r#"{"fontSize": 40, "fontWeight": 400, "fontFamily": "Inter",
            "strokeWeight": "thick", "shadow": "large", "animationType": "fade-blur"}"#;
        let def: FontStyleDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.stroke_weight, Some(StrokeWeight::Thick));
        assert_eq!(def.shadow, Some(ShadowSize::Large));
        assert_eq!(def.animation_type, Some(AnimationType::FadeBlur));
    }

    #[test]
    fn uppercase_transform() {
        let def = FontStyleDefinition::default().uppercased();
        assert_eq!(def.transform_text("hey you"), "HEY YOU");
        assert_eq!(FontStyleDefinition::default().transform_text("hey"), "hey");
    }
}
