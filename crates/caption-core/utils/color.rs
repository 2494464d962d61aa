//! CSS-like color parsing for style definitions

use super::errors::{CoreError, Result};
use core::fmt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Straight (non-premultiplied) RGBA color with 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (255 = opaque)
    pub a: u8,
}

impl Rgba {
    /// Opaque white
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Fully transparent black
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Create a color from all four channels
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(..)`, `rgba(..)` or a
    /// handful of named colors.
    pub fn parse(input: &str) -> Result<Self> {
        let value = input.trim();
        if let Some(hex) = value.strip_prefix('#') {
            return Self::parse_hex(hex).ok_or_else(|| CoreError::InvalidColor(input.to_string()));
        }

        let lower = value.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Self::parse_functional(args)
                .ok_or_else(|| CoreError::InvalidColor(input.to_string()));
        }

        match lower.as_str() {
            "white" => Ok(Self::WHITE),
            "black" => Ok(Self::BLACK),
            "transparent" => Ok(Self::TRANSPARENT),
            "red" => Ok(Self::rgb(255, 0, 0)),
            "yellow" => Ok(Self::rgb(255, 255, 0)),
            _ => Err(CoreError::InvalidColor(input.to_string())),
        }
    }

    /// Parse a color, logging and returning `fallback` when the string is invalid
    pub fn parse_or(input: Option<&str>, fallback: Self) -> Self {
        match input {
            None => fallback,
            Some(value) => Self::parse(value).unwrap_or_else(|err| {
                log::warn!("{err}, using {fallback}");
                fallback
            }),
        }
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.is_ascii() {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            4 => Some(Self::new(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    fn parse_functional(args: &str) -> Option<Self> {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return None;
        }
        let channel = |s: &str| s.parse::<f32>().ok().map(|v| v.clamp(0.0, 255.0).round() as u8);
        let alpha = match parts.get(3) {
            Some(a) => (a.parse::<f32>().ok()?.clamp(0.0, 1.0) * 255.0).round() as u8,
            None => 255,
        };
        Some(Self::new(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            alpha,
        ))
    }

    /// Return this color with its alpha replaced by `alpha` in `0.0..=1.0`
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Alpha as a fraction in `0.0..=1.0`
    pub fn alpha_f32(self) -> f32 {
        f32::from(self.a) / 255.0
    }

    /// RGBA channels as an array
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Rgba::parse("#fff").unwrap(), Rgba::WHITE);
        assert_eq!(Rgba::parse("#FF0000").unwrap(), Rgba::rgb(255, 0, 0));
        assert_eq!(Rgba::parse("#00000080").unwrap(), Rgba::new(0, 0, 0, 128));
        assert_eq!(Rgba::parse("#0008").unwrap(), Rgba::new(0, 0, 0, 136));
    }

    #[test]
    fn parses_functional_forms() {
        assert_eq!(Rgba::parse("rgb(10, 20, 30)").unwrap(), Rgba::rgb(10, 20, 30));
        assert_eq!(
            Rgba::parse("rgba(0,0,0,0.5)").unwrap(),
            Rgba::new(0, 0, 0, 128)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(Rgba::parse("#12").is_err());
        assert!(Rgba::parse("rgb(1,2)").is_err());
        assert!(Rgba::parse("chartreuse-ish").is_err());
        assert!(Rgba::parse("#ééé").is_err());
    }

    #[test]
    fn parse_or_falls_back() {
        assert_eq!(Rgba::parse_or(Some("nope"), Rgba::BLACK), Rgba::BLACK);
        assert_eq!(Rgba::parse_or(None, Rgba::WHITE), Rgba::WHITE);
    }

    #[test]
    fn display_round_trips() {
        let color = Rgba::new(18, 52, 86, 120);
        assert_eq!(Rgba::parse(&color.to_string()).unwrap(), color);
        assert_eq!(Rgba::WHITE.to_string(), "#ffffff");
    }
}
