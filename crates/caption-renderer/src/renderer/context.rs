//! Rendering context with composition, fonts and shared caches

use crate::cache::LayoutCache;
use crate::fonts::FontRegistry;
use crate::metrics::{CachedMeasurer, ShapingMeasurer, TextMeasurer};
use crate::plugin::PolicyRegistry;
use caption_core::Composition;
use std::sync::Arc;
use std::time::Duration;

/// How long a frame waits for missing fonts by default
pub const DEFAULT_FONT_WAIT: Duration = Duration::from_secs(5);

/// Everything a render shares across frames and threads.
///
/// Cloning is cheap; clones share the font registry, measurer, policies and
/// layout cache.
#[derive(Clone)]
pub struct RenderContext {
    composition: Composition,
    fonts: Arc<FontRegistry>,
    measurer: Arc<dyn TextMeasurer>,
    policies: Arc<PolicyRegistry>,
    layout_cache: Arc<LayoutCache>,
    font_wait: Duration,
}

impl RenderContext {
    /// Create a context with system fonts and a cached shaping measurer
    pub fn new(composition: Composition) -> Self {
        Self::with_font_registry(composition, Arc::new(FontRegistry::with_system_fonts()))
    }

    /// Create a context measuring with the fonts of `fonts`
    pub fn with_font_registry(composition: Composition, fonts: Arc<FontRegistry>) -> Self {
        let measurer = CachedMeasurer::new(ShapingMeasurer::new(Arc::clone(&fonts)));
        Self {
            composition,
            fonts,
            measurer: Arc::new(measurer),
            policies: Arc::new(PolicyRegistry::new()),
            layout_cache: Arc::new(LayoutCache::new()),
            font_wait: DEFAULT_FONT_WAIT,
        }
    }

    /// Create a context with a custom measurer and an empty font registry
    pub fn with_measurer(composition: Composition, measurer: Arc<dyn TextMeasurer>) -> Self {
        Self {
            composition,
            fonts: Arc::new(FontRegistry::new()),
            measurer,
            policies: Arc::new(PolicyRegistry::new()),
            layout_cache: Arc::new(LayoutCache::new()),
            font_wait: DEFAULT_FONT_WAIT,
        }
    }

    /// Replace the composition; cached layouts stay valid for other widths
    #[must_use]
    pub fn with_composition(mut self, composition: Composition) -> Self {
        self.composition = composition;
        self
    }

    /// Share `policies` instead of the context's own registry
    #[must_use]
    pub fn with_policies(mut self, policies: Arc<PolicyRegistry>) -> Self {
        self.policies = policies;
        self
    }

    /// Share `layout_cache` instead of the context's own cache
    #[must_use]
    pub fn with_layout_cache(mut self, layout_cache: Arc<LayoutCache>) -> Self {
        self.layout_cache = layout_cache;
        self
    }

    /// Set how long a frame waits for missing fonts
    #[must_use]
    pub fn with_font_wait(mut self, font_wait: Duration) -> Self {
        self.font_wait = font_wait;
        self
    }

    /// Get composition
    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    /// Get render width
    pub fn width(&self) -> u32 {
        self.composition.width
    }

    /// Get render height
    pub fn height(&self) -> u32 {
        self.composition.height
    }

    /// Get frame rate
    pub fn fps(&self) -> f64 {
        self.composition.fps
    }

    /// Get font registry
    pub fn fonts(&self) -> &Arc<FontRegistry> {
        &self.fonts
    }

    /// Get text measurer
    pub fn measurer(&self) -> &dyn TextMeasurer {
        self.measurer.as_ref()
    }

    /// Get layout policies
    pub fn policies(&self) -> &Arc<PolicyRegistry> {
        &self.policies
    }

    /// Get layout cache
    pub fn layout_cache(&self) -> &Arc<LayoutCache> {
        &self.layout_cache
    }

    /// Get font wait timeout
    pub fn font_wait(&self) -> Duration {
        self.font_wait
    }
}

impl std::fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("composition", &self.composition)
            .field("fonts", &self.fonts)
            .field("policies", &self.policies)
            .field("layout_cache", &self.layout_cache)
            .field("font_wait", &self.font_wait)
            .finish()
    }
}
