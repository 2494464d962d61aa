//! Memoizing measurer wrapper

use super::TextMeasurer;
use crate::utils::RenderError;
use ahash::AHashMap;
use caption_core::{FontStyle, FontStyleDefinition};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Cache key for a width measurement
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct MeasureKey {
    text: String,
    font_family: String,
    font_size: u32, // f32 bits, sizes are compared exactly
    font_weight: u16,
    font_style: FontStyle,
    uppercase: bool,
}

impl MeasureKey {
    fn new(text: &str, font: &FontStyleDefinition) -> Self {
        Self {
            text: text.to_string(),
            font_family: font.font_family.clone(),
            font_size: font.font_size.to_bits(),
            font_weight: font.font_weight,
            font_style: font.style(),
            uppercase: font.is_uppercase(),
        }
    }
}

/// Hit and miss counters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MeasureStats {
    /// Lookups answered from the cache
    pub hits: usize,
    /// Lookups that reached the inner measurer
    pub misses: usize,
    /// Entries currently held
    pub entries: usize,
}

/// Wraps a measurer and memoizes single-line widths.
///
/// Errors are not cached, so a width requested before its font loads is
/// measured again on the next call.
pub struct CachedMeasurer<M> {
    inner: M,
    widths: RwLock<AHashMap<MeasureKey, f32>>,
    max_entries: usize,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl<M: TextMeasurer> CachedMeasurer<M> {
    /// Wrap `inner` with the default capacity
    pub fn new(inner: M) -> Self {
        Self::with_capacity(inner, 16_384)
    }

    /// Wrap `inner` holding at most `max_entries` widths
    pub fn with_capacity(inner: M, max_entries: usize) -> Self {
        Self {
            inner,
            widths: RwLock::new(AHashMap::new()),
            max_entries: max_entries.max(1),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Measurer doing the actual work
    pub fn inner(&self) -> &M {
        &self.inner
    }

    /// Drop all memoized widths
    pub fn clear(&self) {
        self.widths.write().clear();
    }

    /// Current statistics
    pub fn stats(&self) -> MeasureStats {
        MeasureStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.widths.read().len(),
        }
    }
}

impl<M: TextMeasurer> TextMeasurer for CachedMeasurer<M> {
    fn measure_width(&self, text: &str, font: &FontStyleDefinition) -> Result<f32, RenderError> {
        let key = MeasureKey::new(text, font);
        if let Some(&width) = self.widths.read().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(width);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let width = self.inner.measure_width(text, font)?;

        let mut widths = self.widths.write();
        if widths.len() >= self.max_entries {
            if let Some(first_key) = widths.keys().next().cloned() {
                widths.remove(&first_key);
            }
        }
        widths.insert(key, width);
        Ok(width)
    }
}

impl<M: std::fmt::Debug> std::fmt::Debug for CachedMeasurer<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedMeasurer")
            .field("inner", &self.inner)
            .field("entries", &self.widths.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::test_support::FixedAdvanceMeasurer;

    #[test]
    fn repeated_lookups_hit() {
        let measurer = CachedMeasurer::new(FixedAdvanceMeasurer);
        let font = FontStyleDefinition::new(40.0, 400, "Test");
        let first = measurer.measure_width("hello", &font).unwrap();
        let second = measurer.measure_width("hello", &font).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
        let stats = measurer.stats();
        assert_eq!((stats.hits, stats.misses, stats.entries), (1, 1, 1));
    }

    #[test]
    fn distinct_fonts_are_distinct_entries() {
        let measurer = CachedMeasurer::new(FixedAdvanceMeasurer);
        let font = FontStyleDefinition::new(40.0, 400, "Test");
        measurer.measure_width("hello", &font).unwrap();
        measurer.measure_width("hello", &font.clone().uppercased()).unwrap();
        measurer
            .measure_width("hello", &FontStyleDefinition::new(41.0, 400, "Test"))
            .unwrap();
        assert_eq!(measurer.stats().entries, 3);
    }

    #[test]
    fn capacity_is_bounded() {
        let measurer = CachedMeasurer::with_capacity(FixedAdvanceMeasurer, 2);
        let font = FontStyleDefinition::new(40.0, 400, "Test");
        for word in ["a", "b", "c", "d"] {
            measurer.measure_width(word, &font).unwrap();
        }
        assert_eq!(measurer.stats().entries, 2);
    }
}
