//! Measurement backed by real font data

use super::TextMeasurer;
use crate::fonts::FontRegistry;
use crate::shaping::shape_text;
use crate::utils::RenderError;
use caption_core::FontStyleDefinition;
use std::sync::Arc;

/// Measures text by shaping it with rustybuzz against the registry's faces.
///
/// Fails with [`RenderError::FontNotLoaded`] when the requested family is not
/// registered; it never substitutes another family.
#[derive(Debug, Clone)]
pub struct ShapingMeasurer {
    registry: Arc<FontRegistry>,
}

impl ShapingMeasurer {
    /// Create a measurer over `registry`
    pub fn new(registry: Arc<FontRegistry>) -> Self {
        Self { registry }
    }

    /// Registry the measurer reads faces from
    pub fn registry(&self) -> &Arc<FontRegistry> {
        &self.registry
    }
}

impl TextMeasurer for ShapingMeasurer {
    fn measure_width(&self, text: &str, font: &FontStyleDefinition) -> Result<f32, RenderError> {
        let text = font.transform_text(text);
        if text.is_empty() {
            return Ok(0.0);
        }
        let shaped = shape_text(&self.registry, &text, font)?;
        Ok(shaped.width(font.font_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_zero_even_without_fonts() {
        let measurer = ShapingMeasurer::new(Arc::new(FontRegistry::new()));
        let font = FontStyleDefinition::new(60.0, 400, "Missing");
        assert_eq!(measurer.measure_width("", &font).unwrap(), 0.0);
    }

    #[test]
    fn missing_family_is_not_substituted() {
        let measurer = ShapingMeasurer::new(Arc::new(FontRegistry::new()));
        let font = FontStyleDefinition::new(60.0, 400, "Missing");
        assert!(matches!(
            measurer.measure_width("hello", &font),
            Err(RenderError::FontNotLoaded(_))
        ));
    }

    #[test]
    fn uppercase_affects_width() {
        let registry = Arc::new(FontRegistry::with_system_fonts());
        let Some(family) = ["DejaVu Sans", "Liberation Sans", "Arial"]
            .into_iter()
            .find(|family| registry.has_family(family))
        else {
            return;
        };
        let measurer = ShapingMeasurer::new(registry);
        let plain = FontStyleDefinition::new(60.0, 400, family);
        let upper = plain.clone().uppercased();
        let lower_width = measurer.measure_width("hello", &plain).unwrap();
        let upper_width = measurer.measure_width("hello", &upper).unwrap();
        assert_eq!(upper_width, measurer.measure_width("HELLO", &plain).unwrap());
        assert!(upper_width > lower_width);
    }
}
