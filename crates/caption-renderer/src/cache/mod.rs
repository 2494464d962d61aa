//! Caching of group layouts
//!
//! Layout is the only expensive step of a frame: it measures every line at
//! least twice and wraps it once. A layout depends on the group's words, the
//! typography of the slots the group uses, the container width and the
//! variant's layout knobs and the registered layout policies, never on the
//! frame, so it is computed once and shared by preview, export and every
//! worker thread.

use crate::layout::{GroupLayout, LayoutParams};
use crate::variants::TextAlign;
use ahash::{AHashMap, RandomState};
use caption_core::{FontStyleDefinition, Group, SubtitleStyleConfig};
use parking_lot::RwLock;
use std::hash::{BuildHasher, Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Content fingerprint of everything a group layout depends on
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct LayoutKey(u64);

impl LayoutKey {
    /// Fingerprint `group` laid out with `style` under `params`, with the
    /// policy registry at `policy_generation`
    pub fn new(
        group: &Group,
        style: &SubtitleStyleConfig,
        params: &LayoutParams,
        policy_generation: u64,
    ) -> Self {
        // Fixed seeds keep keys equal across caches within one process.
        let mut hasher = RandomState::with_seeds(0x6361_7074, 0x696f_6e73, 0x6c61_796f, 0x7574_7321)
            .build_hasher();

        style.id.hash(&mut hasher);
        policy_generation.hash(&mut hasher);
        params.container_width.to_bits().hash(&mut hasher);
        params.max_font_size.to_bits().hash(&mut hasher);
        params.line_spacing.to_bits().hash(&mut hasher);
        matches!(params.align, TextAlign::Left).hash(&mut hasher);

        group.start_time.to_bits().hash(&mut hasher);
        group.lines.len().hash(&mut hasher);
        for line in &group.lines {
            line.font_type.hash(&mut hasher);
            hash_font(style.fonts.get(line.font_type), &mut hasher);
            line.words.len().hash(&mut hasher);
            for word in &line.words {
                word.text.hash(&mut hasher);
            }
        }

        Self(hasher.finish())
    }

    /// Raw fingerprint value
    pub fn value(self) -> u64 {
        self.0
    }
}

fn hash_font(font: &FontStyleDefinition, hasher: &mut impl Hasher) {
    font.font_size.to_bits().hash(hasher);
    font.font_weight.hash(hasher);
    font.font_family.hash(hasher);
    font.style().hash(hasher);
    font.is_uppercase().hash(hasher);
    font.animation_type.hash(hasher);
}

/// Cache statistics for monitoring
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups served from the cache
    pub hits: usize,
    /// Lookups that computed a layout
    pub misses: usize,
    /// Entries dropped to stay under capacity
    pub evictions: usize,
    /// Entries currently stored
    pub entries: usize,
}

impl CacheStats {
    /// Fraction of lookups served from the cache
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Thread-safe store of computed group layouts
pub struct LayoutCache {
    layouts: RwLock<AHashMap<LayoutKey, Arc<GroupLayout>>>,
    max_entries: usize,
    hits: AtomicUsize,
    misses: AtomicUsize,
    evictions: AtomicUsize,
}

impl LayoutCache {
    /// Create a cache holding up to 4096 layouts
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Create with a custom limit
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            layouts: RwLock::new(AHashMap::new()),
            max_entries: max_entries.max(1),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            evictions: AtomicUsize::new(0),
        }
    }

    /// Cached layout for `key`
    pub fn get(&self, key: LayoutKey) -> Option<Arc<GroupLayout>> {
        let found = self.layouts.read().get(&key).cloned();
        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// Store `layout` under `key`
    pub fn insert(&self, key: LayoutKey, layout: GroupLayout) -> Arc<GroupLayout> {
        let layout = Arc::new(layout);
        let mut layouts = self.layouts.write();
        if layouts.len() >= self.max_entries && !layouts.contains_key(&key) {
            // Simple eviction: remove the first key the map yields
            if let Some(first_key) = layouts.keys().next().copied() {
                layouts.remove(&first_key);
                self.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }
        layouts.insert(key, Arc::clone(&layout));
        layout
    }

    /// Cached layout for `key`, computing and storing it on a miss.
    /// Errors from `compute` are returned and nothing is stored.
    pub fn get_or_insert_with<E>(
        &self,
        key: LayoutKey,
        compute: impl FnOnce() -> Result<GroupLayout, E>,
    ) -> Result<Arc<GroupLayout>, E> {
        if let Some(layout) = self.get(key) {
            return Ok(layout);
        }
        let layout = compute()?;
        Ok(self.insert(key, layout))
    }

    /// Number of stored layouts
    pub fn len(&self) -> usize {
        self.layouts.read().len()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.layouts.read().is_empty()
    }

    /// Drop every layout and reset statistics
    pub fn clear(&self) {
        self.layouts.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
    }

    /// Current statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    /// Log statistics at debug level
    pub fn log_stats(&self) {
        let stats = self.stats();
        log::debug!(
            "layout cache: {} entries, {:.1}% hit rate ({}/{} hits), {} evictions",
            stats.entries,
            stats.hit_rate() * 100.0,
            stats.hits,
            stats.hits + stats.misses,
            stats.evictions
        );
    }
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LayoutCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutCache")
            .field("max_entries", &self.max_entries)
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caption_core::{resolve_style, FontType, Line, Word};
    use pretty_assertions::assert_eq;

    fn group(text: &str) -> Group {
        Group {
            id: "g".into(),
            start_time: 1.0,
            end_time: 2.0,
            lines: vec![Line {
                id: "l".into(),
                start_time: 1.0,
                end_time: 2.0,
                font_type: FontType::Bold,
                words: vec![Word {
                    id: "w".into(),
                    text: text.into(),
                    start_time: 1.0,
                    end_time: 2.0,
                }],
            }],
        }
    }

    #[test]
    fn key_tracks_layout_inputs() {
        let style = resolve_style("basic", None);
        let params = LayoutParams::new(900.0);
        let key = LayoutKey::new(&group("hello"), &style, &params, 0);

        assert_eq!(key, LayoutKey::new(&group("hello"), &style, &params, 0));
        assert_ne!(key, LayoutKey::new(&group("world"), &style, &params, 0));
        assert_ne!(key, LayoutKey::new(&group("hello"), &style, &LayoutParams::new(800.0), 0));

        let mut bigger = style.clone();
        bigger.fonts.bold.font_size += 1.0;
        assert_ne!(key, LayoutKey::new(&group("hello"), &bigger, &params, 0));

        // Paint-only fields do not invalidate layouts.
        let mut recolored = style.clone();
        recolored.fonts.bold.color = Some("#ff0000".into());
        assert_eq!(key, LayoutKey::new(&group("hello"), &recolored, &params, 0));
        assert_ne!(key, LayoutKey::new(&group("hello"), &style, &params, 1));
    }

    #[test]
    fn hits_misses_and_errors() {
        let cache = LayoutCache::new();
        let key = LayoutKey(7);

        let failed: Result<_, &str> = cache.get_or_insert_with(key, || Err("boom"));
        assert!(failed.is_err());
        assert!(cache.is_empty());

        let first = cache
            .get_or_insert_with::<()>(key, || Ok(GroupLayout::empty()))
            .unwrap();
        let second = cache
            .get_or_insert_with::<()>(key, || panic!("layout recomputed"))
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses, stats.entries), (1, 2, 1));
    }

    #[test]
    fn capacity_is_respected() {
        let cache = LayoutCache::with_capacity(2);
        for i in 0..5 {
            cache.insert(LayoutKey(i), GroupLayout::empty());
        }
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 3);
        cache.clear();
        assert_eq!(cache.stats(), CacheStats::default());
    }
}
