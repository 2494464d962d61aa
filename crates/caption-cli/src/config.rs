//! Render configuration read from TOML

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Output video geometry; `duration_in_frames` defaults to the transcript's end
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompositionConfig {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub duration_in_frames: Option<u32>,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
            fps: 30.0,
            duration_in_frames: None,
        }
    }
}

/// Everything a render needs besides the transcript
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub composition: CompositionConfig,
    /// Named style id
    pub style: String,
    /// JSON file with a partial style override
    pub style_override: Option<PathBuf>,
    /// Load the platform's fonts
    pub system_fonts: bool,
    /// Extra font directories
    pub font_dirs: Vec<PathBuf>,
    /// How long a frame waits for missing fonts
    pub font_wait_ms: u64,
    /// Frames evaluated per export batch
    pub batch_size: usize,
    /// Worker threads for export, 0 lets rayon decide
    pub threads: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            composition: CompositionConfig::default(),
            style: "basic".to_string(),
            style_override: None,
            system_fonts: true,
            font_dirs: Vec::new(),
            font_wait_ms: 5000,
            batch_size: caption_renderer::renderer::DEFAULT_BATCH_SIZE,
            threads: 0,
        }
    }
}

impl RenderConfig {
    /// Read `path`, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Parse TOML text
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn font_wait(&self) -> Duration {
        Duration::from_millis(self.font_wait_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(RenderConfig::parse("").unwrap(), RenderConfig::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config = RenderConfig::parse(
            r#"
            style = "gradient"
            font_dirs = ["fonts"]

            [composition]
            width = 1920
            height = 1080
            "#,
        )
        .unwrap();
        assert_eq!(config.style, "gradient");
        assert_eq!(config.composition.width, 1920);
        assert_eq!(config.composition.fps, 30.0);
        assert_eq!(config.font_dirs, vec![PathBuf::from("fonts")]);
        assert_eq!(config.font_wait(), Duration::from_secs(5));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(RenderConfig::parse("colour = \"red\"").is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "batch_size = 8\nthreads = 2").unwrap();
        let config = RenderConfig::load(Some(file.path())).unwrap();
        assert_eq!((config.batch_size, config.threads), (8, 2));
        assert!(RenderConfig::load(Some(Path::new("/nonexistent/caption.toml"))).is_err());
    }
}
