//! Built-in named styles

use super::{
    AnimationType, FontStyle, FontStyleDefinition, PartialFontMap, ShadowSize, StrokeWeight,
};

/// Style used when an unknown id is requested
pub const BASIC_STYLE_ID: &str = "basic";

/// Ids of every built-in style
pub const PRESET_IDS: [&str; 7] = [
    "basic",
    "equal-width",
    "gradient",
    "combined-animation",
    "three-lines",
    "three-lines-left",
    "combo",
];

/// A named style as shipped; slots may be left out and resolve to the built-in default
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTemplate {
    /// Style id
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Catalog category
    pub category: &'static str,
    /// Top padding in pixels
    pub caption_padding: u32,
    /// Font slots
    pub fonts: PartialFontMap,
}

/// Look up a built-in style by id
pub fn named_style(id: &str) -> Option<StyleTemplate> {
    let template = match id {
        "basic" => StyleTemplate {
            id: "basic",
            name: "Basic",
            category: "basic",
            caption_padding: 0,
            fonts: PartialFontMap {
                bold: Some(FontStyleDefinition::new(80.0, 700, "Arial").with_color("#ffffff")),
                thin: Some(FontStyleDefinition::new(50.0, 300, "Arial").with_color("#ffffff")),
                normal: Some(FontStyleDefinition::new(60.0, 400, "Arial").with_color("#ffffff")),
                italic: Some(
                    FontStyleDefinition::new(60.0, 400, "Arial")
                        .with_style(FontStyle::Italic)
                        .with_color("#ffffff"),
                ),
            },
        },
        "equal-width" => StyleTemplate {
            id: "equal-width",
            name: "Equal Width",
            category: "dynamic",
            caption_padding: 40,
            fonts: PartialFontMap {
                bold: Some(
                    FontStyleDefinition::new(120.0, 900, "Montserrat")
                        .with_color("#ffffff")
                        .uppercased()
                        .with_stroke(StrokeWeight::Thick, "#000000"),
                ),
                thin: Some(
                    FontStyleDefinition::new(48.0, 300, "Montserrat")
                        .with_color("#ffffff")
                        .uppercased(),
                ),
                normal: Some(
                    FontStyleDefinition::new(60.0, 500, "Montserrat")
                        .with_color("#ffffff")
                        .uppercased()
                        .with_stroke(StrokeWeight::Medium, "#000000"),
                ),
                italic: Some(
                    FontStyleDefinition::new(64.0, 400, "Montserrat")
                        .with_style(FontStyle::Italic)
                        .with_color("#ffd400")
                        .uppercased(),
                ),
            },
        },
        "gradient" => StyleTemplate {
            id: "gradient",
            name: "Gradient Glow",
            category: "glow",
            caption_padding: 40,
            fonts: PartialFontMap {
                bold: Some(
                    FontStyleDefinition::new(100.0, 800, "Poppins")
                        .with_color("#ffffff")
                        .with_glow(ShadowSize::Large, "#ff00ff"),
                ),
                thin: Some(
                    FontStyleDefinition::new(52.0, 300, "Poppins")
                        .with_color("#e0e0ff")
                        .with_glow(ShadowSize::Small, "#8a2be2"),
                ),
                normal: Some(
                    FontStyleDefinition::new(64.0, 500, "Poppins")
                        .with_color("#ffffff")
                        .with_glow(ShadowSize::Medium, "#00e5ff"),
                ),
                italic: Some(
                    FontStyleDefinition::new(64.0, 500, "Poppins")
                        .with_style(FontStyle::Italic)
                        .with_color("#ffe066")
                        .with_glow(ShadowSize::Medium, "#ff8800"),
                ),
            },
        },
        "combined-animation" => StyleTemplate {
            id: "combined-animation",
            name: "Combined Animation",
            category: "dynamic",
            caption_padding: 60,
            fonts: PartialFontMap {
                bold: Some(
                    FontStyleDefinition::new(110.0, 900, "Bebas Neue")
                        .with_color("#ffffff")
                        .uppercased()
                        .with_stroke(StrokeWeight::Medium, "#000000")
                        .with_glow(ShadowSize::Small, "#000000"),
                ),
                thin: Some(
                    FontStyleDefinition::new(56.0, 300, "Bebas Neue")
                        .with_color("#ffffff")
                        .uppercased()
                        .with_animation(AnimationType::FadeBlur),
                ),
                normal: Some(
                    FontStyleDefinition::new(70.0, 400, "Bebas Neue")
                        .with_color("#ffffff")
                        .uppercased()
                        .with_stroke(StrokeWeight::Thin, "#000000"),
                ),
                italic: Some(
                    FontStyleDefinition::new(70.0, 400, "Bebas Neue")
                        .with_style(FontStyle::Italic)
                        .with_color("#7CFC00")
                        .uppercased(),
                ),
            },
        },
        "three-lines" => StyleTemplate {
            id: "three-lines",
            name: "Three Lines",
            category: "stacked",
            caption_padding: 80,
            fonts: PartialFontMap {
                bold: Some(
                    FontStyleDefinition::new(96.0, 800, "Inter")
                        .with_color("#ffffff")
                        .with_stroke(StrokeWeight::Medium, "#000000"),
                ),
                thin: Some(FontStyleDefinition::new(44.0, 200, "Inter").with_color("#ffffff")),
                normal: Some(
                    FontStyleDefinition::new(58.0, 400, "Inter")
                        .with_color("#ffffff")
                        .with_stroke(StrokeWeight::Thin, "#000000"),
                ),
                italic: Some(
                    FontStyleDefinition::new(58.0, 400, "Inter")
                        .with_style(FontStyle::Italic)
                        .with_color("#ffcc00"),
                ),
            },
        },
        "three-lines-left" => StyleTemplate {
            id: "three-lines-left",
            name: "Three Lines (Left)",
            category: "stacked",
            caption_padding: 80,
            fonts: PartialFontMap {
                bold: Some(
                    FontStyleDefinition::new(96.0, 800, "Inter")
                        .with_color("#ffffff")
                        .uppercased()
                        .with_stroke(StrokeWeight::Medium, "#000000"),
                ),
                thin: Some(FontStyleDefinition::new(44.0, 200, "Inter").with_color("#ffffff")),
                normal: Some(FontStyleDefinition::new(58.0, 400, "Inter").with_color("#ffffff")),
                italic: Some(
                    FontStyleDefinition::new(58.0, 400, "Inter")
                        .with_style(FontStyle::Italic)
                        .with_color("#ffcc00"),
                ),
            },
        },
        "combo" => StyleTemplate {
            id: "combo",
            name: "Combo",
            category: "combo",
            caption_padding: 40,
            fonts: PartialFontMap {
                bold: Some(
                    FontStyleDefinition::new(110.0, 900, "Anton")
                        .with_color("#ffffff")
                        .uppercased()
                        .with_stroke(StrokeWeight::Thick, "#000000"),
                ),
                normal: Some(
                    FontStyleDefinition::new(64.0, 400, "Anton")
                        .with_color("#ffffff")
                        .uppercased(),
                ),
                ..PartialFontMap::default()
            },
        },
        _ => return None,
    };
    Some(template)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_preset_exists() {
        for id in PRESET_IDS {
            let template = named_style(id).unwrap();
            assert_eq!(template.id, id);
        }
        assert!(named_style("nope").is_none());
    }

    #[test]
    fn basic_populates_every_slot() {
        let basic = named_style(BASIC_STYLE_ID).unwrap();
        for font_type in super::super::FontType::ALL {
            assert!(basic.fonts.get(font_type).is_some());
        }
    }
}
