//! Math utilities for transformations and interpolation

/// Per-word transform applied around the word's own center
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WordTransform {
    /// Horizontal offset in pixels
    pub translate_x: f32,
    /// Vertical offset in pixels
    pub translate_y: f32,
    /// Uniform scale factor
    pub scale: f32,
}

impl WordTransform {
    /// Create identity transform
    pub const fn identity() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
        }
    }

    /// Whether applying this transform is a no-op
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Map a point given relative to the word center
    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.scale + self.translate_x,
            y * self.scale + self.translate_y,
        )
    }
}

impl Default for WordTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Linear interpolation
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Map `value` from `input` onto `output` linearly, extrapolating past both ends.
///
/// A degenerate input range maps everything to `output.0`.
pub fn interpolate(value: f64, input: (f64, f64), output: (f64, f64)) -> f64 {
    let span = input.1 - input.0;
    if span == 0.0 {
        return output.0;
    }
    lerp(output.0, output.1, (value - input.0) / span)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolate_extends_both_ends() {
        assert_eq!(interpolate(0.5, (0.0, 1.0), (0.0, 40.0)), 20.0);
        assert_eq!(interpolate(1.25, (0.0, 1.0), (40.0, 0.0)), -10.0);
        assert_eq!(interpolate(-1.0, (0.0, 1.0), (0.5, 1.0)), 0.0);
        assert_eq!(interpolate(3.0, (2.0, 2.0), (7.0, 9.0)), 7.0);
    }

    #[test]
    fn transform_scales_before_translating() {
        let t = WordTransform {
            translate_x: 10.0,
            translate_y: -4.0,
            scale: 0.5,
        };
        assert_eq!(t.transform_point(20.0, 8.0), (20.0, 0.0));
        assert!(WordTransform::default().is_identity());
    }
}
