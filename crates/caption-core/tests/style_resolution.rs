//! Style resolution against JSON inputs as they arrive from the web app

use caption_core::style::PRESET_IDS;
use caption_core::{resolve_style, FontStyleDefinition, FontType, StyleOverride, SubtitleStyleConfig};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn json_override_replaces_slot_and_keeps_others() {
    let json = r##"{
        "captionPadding": 24,
        "fonts": {
            "italic": {"fontSize": 70, "fontWeight": "bold", "fontFamily": "Lobster", "color": "#00ff00"}
        }
    }"##;
    let style_override = StyleOverride::from_json(json).unwrap();
    let resolved = resolve_style("three-lines", Some(&style_override));

    assert_eq!(resolved.caption_padding, 24);
    let italic = resolved.fonts.get(FontType::Italic);
    assert_eq!(italic.font_family, "Lobster");
    assert_eq!(italic.font_weight, 700);
    assert_eq!(italic.font_style, None);

    let base = resolve_style("three-lines", None);
    assert_eq!(resolved.fonts.bold, base.fonts.bold);
    assert_eq!(resolved.fonts.thin, base.fonts.thin);
    assert_eq!(resolved.fonts.normal, base.fonts.normal);
}

#[test]
fn resolved_style_survives_json_round_trip() {
    let resolved = resolve_style("equal-width", None);
    let json = serde_json::to_string(&resolved).unwrap();
    let decoded = SubtitleStyleConfig::from_json(&json).unwrap();
    assert_eq!(decoded, resolved);
}

#[test]
fn every_preset_resolves_all_slots() {
    for id in PRESET_IDS {
        let resolved = resolve_style(id, None);
        assert_eq!(resolved.id, id);
        for font_type in FontType::ALL {
            let def = resolved.fonts.get(font_type);
            assert!(def.font_size > 0.0, "{id}/{}", font_type.as_str());
            assert!(!def.font_family.is_empty());
        }
    }
}

#[test]
fn empty_override_is_identity() {
    let empty = StyleOverride::from_json("{}").unwrap();
    for id in PRESET_IDS {
        assert_eq!(resolve_style(id, Some(&empty)), resolve_style(id, None));
    }
}

proptest! {
    #[test]
    fn any_style_id_resolves(id in "[a-z\\-]{0,24}") {
        let resolved = resolve_style(&id, None);
        let expected_id = if PRESET_IDS.contains(&id.as_str()) { id.as_str() } else { "basic" };
        prop_assert_eq!(resolved.id.as_str(), expected_id);
        prop_assert_eq!(resolved.fonts.get(FontType::Unknown), FontStyleDefinition::fallback());
    }
}
