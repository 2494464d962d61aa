//! Plugin system for per-style layout policies
//!
//! Some styles (the `combo` family) decide line scales or animations with
//! rules of their own. Such a style registers a [`LayoutPolicy`] under its
//! style id; layout consults it before falling back to width equalization and
//! the seeded assignment.

use ahash::AHashMap;
use caption_core::{AnimationType, Group, SubtitleStyleConfig};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Layout override hook for one style
pub trait LayoutPolicy: Send + Sync {
    /// Get policy name
    fn name(&self) -> &str;

    /// Font scale per line, or `None` to use width equalization.
    /// `raw_widths` are the unscaled single-line widths.
    fn font_scales(
        &self,
        group: &Group,
        style: &SubtitleStyleConfig,
        raw_widths: &[f32],
    ) -> Option<Vec<f32>> {
        let _ = (group, style, raw_widths);
        None
    }

    /// Archetype per line, or `None` to use the seeded assignment
    fn animations(&self, group: &Group, style: &SubtitleStyleConfig) -> Option<Vec<AnimationType>> {
        let _ = (group, style);
        None
    }
}

/// Policy registry keyed by style id
///
/// Every change bumps [`generation`](Self::generation), which layout cache
/// keys include, so layouts computed under a replaced policy are never served.
#[derive(Default)]
pub struct PolicyRegistry {
    policies: RwLock<AHashMap<String, Arc<dyn LayoutPolicy>>>,
    generation: AtomicU64,
}

impl PolicyRegistry {
    /// Create a new policy registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `policy` for `style_id`, replacing any previous one
    pub fn register(&self, style_id: impl Into<String>, policy: Arc<dyn LayoutPolicy>) {
        let style_id = style_id.into();
        log::debug!("registering layout policy '{}' for style '{style_id}'", policy.name());
        self.policies.write().insert(style_id, policy);
        self.generation.fetch_add(1, Ordering::Release);
    }

    /// Remove the policy of `style_id`
    pub fn unregister(&self, style_id: &str) -> Option<Arc<dyn LayoutPolicy>> {
        let removed = self.policies.write().remove(style_id);
        if removed.is_some() {
            self.generation.fetch_add(1, Ordering::Release);
        }
        removed
    }

    /// Counter advanced by every registration change
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Policy registered for `style_id`
    pub fn get(&self, style_id: &str) -> Option<Arc<dyn LayoutPolicy>> {
        self.policies.read().get(style_id).cloned()
    }

    /// Style ids with a registered policy, sorted
    pub fn list(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.policies.read().keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl std::fmt::Debug for PolicyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyRegistry")
            .field("styles", &self.list())
            .field("generation", &self.generation())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Uniform;

    impl LayoutPolicy for Uniform {
        fn name(&self) -> &str {
            "uniform"
        }

        fn font_scales(&self, group: &Group, _: &SubtitleStyleConfig, _: &[f32]) -> Option<Vec<f32>> {
            Some(vec![1.0; group.lines.len()])
        }
    }

    #[test]
    fn register_lookup_unregister() {
        let registry = PolicyRegistry::new();
        assert!(registry.get("combo").is_none());
        assert_eq!(registry.generation(), 0);
        registry.register("combo", Arc::new(Uniform));
        assert_eq!(registry.get("combo").map(|p| p.name().to_string()), Some("uniform".into()));
        assert_eq!(registry.list(), vec!["combo".to_string()]);
        assert_eq!(registry.generation(), 1);
        assert!(registry.unregister("combo").is_some());
        assert!(registry.list().is_empty());
        assert_eq!(registry.generation(), 2);
        // Removing nothing changes nothing.
        assert!(registry.unregister("combo").is_none());
        assert_eq!(registry.generation(), 2);
    }

    #[test]
    fn defaults_decline() {
        struct Nothing;
        impl LayoutPolicy for Nothing {
            fn name(&self) -> &str {
                "nothing"
            }
        }
        let style = caption_core::resolve_style("combo", None);
        let group = Group {
            id: "g".into(),
            start_time: 0.0,
            end_time: 1.0,
            lines: Vec::new(),
        };
        assert!(Nothing.font_scales(&group, &style, &[]).is_none());
        assert!(Nothing.animations(&group, &style).is_none());
    }
}
