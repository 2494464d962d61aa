//! Merge a named style with a per-video override

use super::presets::{named_style, StyleTemplate, BASIC_STYLE_ID};
use super::{FontMap, FontStyleDefinition, FontType, StyleOverride, SubtitleStyleConfig};

/// Resolve `style_id` plus an optional override into a complete style.
///
/// Precedence per font slot: override slot, then the named style's slot, then
/// [`FontStyleDefinition::fallback`]. A slot is always replaced as a whole;
/// fields are never merged across sources. Unknown ids resolve against the
/// `basic` style. Never fails.
pub fn resolve_style(style_id: &str, style_override: Option<&StyleOverride>) -> SubtitleStyleConfig {
    let template = named_style(style_id).unwrap_or_else(|| {
        log::warn!("unknown style id '{style_id}', falling back to '{BASIC_STYLE_ID}'");
        basic_template()
    });

    let slot = |font_type: FontType| -> FontStyleDefinition {
        style_override
            .and_then(|o| o.fonts.as_ref())
            .and_then(|fonts| fonts.get(font_type))
            .or_else(|| template.fonts.get(font_type))
            .cloned()
            .unwrap_or_else(|| FontStyleDefinition::fallback().clone())
    };

    let fonts = FontMap {
        bold: slot(FontType::Bold),
        thin: slot(FontType::Thin),
        normal: slot(FontType::Normal),
        italic: slot(FontType::Italic),
    };

    let field = |value: Option<&String>, base: &str| value.cloned().unwrap_or_else(|| base.to_string());

    SubtitleStyleConfig {
        id: field(style_override.and_then(|o| o.id.as_ref()), template.id),
        name: field(style_override.and_then(|o| o.name.as_ref()), template.name),
        category: field(style_override.and_then(|o| o.category.as_ref()), template.category),
        caption_padding: style_override
            .and_then(|o| o.caption_padding)
            .unwrap_or(template.caption_padding),
        fonts,
    }
}

fn basic_template() -> StyleTemplate {
    match named_style(BASIC_STYLE_ID) {
        Some(template) => template,
        None => StyleTemplate {
            id: BASIC_STYLE_ID,
            name: "Basic",
            category: "basic",
            caption_padding: 0,
            fonts: super::PartialFontMap::default(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{PartialFontMap, StrokeWeight};

    #[test]
    fn unknown_id_falls_back_to_basic() {
        let resolved = resolve_style("does-not-exist", None);
        assert_eq!(resolved, resolve_style(BASIC_STYLE_ID, None));
        assert_eq!(resolved.id, "basic");
    }

    #[test]
    fn override_slot_replaces_whole_definition() {
        let mut fonts = PartialFontMap::default();
        fonts.set(FontType::Bold, FontStyleDefinition::new(72.0, 500, "Inter"));
        let style_override = StyleOverride {
            fonts: Some(fonts),
            ..StyleOverride::default()
        };

        let resolved = resolve_style("equal-width", Some(&style_override));
        let bold = resolved.fonts.get(FontType::Bold);
        assert_eq!(bold.font_family, "Inter");
        // The preset's stroke and uppercase are not merged into the replacement.
        assert_eq!(bold.stroke_weight, None);
        assert_eq!(bold.uppercase, None);
        assert_eq!(bold.color, None);
        // Untouched slots keep the preset definition.
        assert_eq!(
            resolved.fonts.get(FontType::Normal).stroke_weight,
            Some(StrokeWeight::Medium)
        );
    }

    #[test]
    fn missing_slots_use_hard_coded_default() {
        let resolved = resolve_style("combo", None);
        assert_eq!(resolved.fonts.get(FontType::Thin), FontStyleDefinition::fallback());
        assert_eq!(resolved.fonts.get(FontType::Italic), FontStyleDefinition::fallback());
        assert_eq!(resolved.fonts.get(FontType::Bold).font_family, "Anton");
    }

    #[test]
    fn config_level_fields_spread() {
        let style_override = StyleOverride {
            name: Some("My captions".to_string()),
            caption_padding: Some(12),
            ..StyleOverride::default()
        };
        let resolved = resolve_style("gradient", Some(&style_override));
        assert_eq!(resolved.id, "gradient");
        assert_eq!(resolved.name, "My captions");
        assert_eq!(resolved.category, "glow");
        assert_eq!(resolved.caption_padding, 12);
    }
}
