//! Seeded, reproducible animation assignment
//!
//! Lines of a group get their entrance archetype from a shuffle driven by a
//! tiny linear congruential generator seeded with the group's start time.
//! The same start time always produces the same sequence, in preview, in
//! export and across re-renders.

use crate::plugin::LayoutPolicy;
use crate::utils::RenderError;
use caption_core::{AnimationType, Group, SubtitleStyleConfig};

const LCG_MULTIPLIER: u64 = 9301;
const LCG_INCREMENT: u64 = 49297;
const LCG_MODULUS: u64 = 233_280;

/// Linear congruential generator producing values in `[0, 1)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededRandom {
    seed: u64,
}

impl SeededRandom {
    /// Generator with a raw seed
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Generator seeded by hashing `key`
    pub fn from_key(key: &str) -> Self {
        Self::new(u64::from(rolling_hash(key).unsigned_abs()))
    }

    /// Generator for a group starting at `start_time` seconds
    pub fn for_group_start(start_time: f64) -> Self {
        Self::from_key(&seed_key(start_time))
    }

    /// Next value in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        self.seed = (self.seed.wrapping_mul(LCG_MULTIPLIER).wrapping_add(LCG_INCREMENT)) % LCG_MODULUS;
        self.seed as f64 / LCG_MODULUS as f64
    }
}

/// `hash = hash * 31 + code unit` over UTF-16 code units, wrapping at 32 bits
pub fn rolling_hash(key: &str) -> i32 {
    key.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Seconds formatted with three decimals, rounding exact ties away from zero
pub fn seed_key(seconds: f64) -> String {
    if seconds.is_nan() {
        return "NaN".to_string();
    }
    if seconds.is_infinite() {
        return if seconds > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if seconds == 0.0 {
        return "0.000".to_string();
    }

    let magnitude = seconds.abs();
    // Only multiples of 1/16 land exactly on a half-thousandth; `{:.3}`
    // rounds those to even, so handle them here.
    let is_tie = (magnitude * 16.0).fract() == 0.0 && (magnitude * 1000.0).fract() == 0.5;
    if !is_tie {
        return format!("{seconds:.3}");
    }

    let thousandths = (magnitude * 1000.0).ceil() as u64;
    let sign = if seconds < 0.0 { "-" } else { "" };
    format!("{sign}{}.{:03}", thousandths / 1000, thousandths % 1000)
}

/// Fisher-Yates shuffle of every archetype, consuming values from `rng`
pub fn shuffled_archetypes(rng: &mut SeededRandom) -> [AnimationType; 6] {
    let mut archetypes = AnimationType::ALL;
    for i in (1..archetypes.len()).rev() {
        let j = (rng.next_f64() * (i + 1) as f64).floor() as usize;
        archetypes.swap(i, j);
    }
    archetypes
}

/// Archetype per line for a group starting at `start_time` with `line_count`
/// lines. Groups longer than the archetype list continue with further
/// shuffled passes from the same generator.
pub fn assign_animations(start_time: f64, line_count: usize) -> Vec<AnimationType> {
    let mut rng = SeededRandom::for_group_start(start_time);
    let mut assigned = Vec::with_capacity(line_count);
    while assigned.len() < line_count {
        assigned.extend_from_slice(&shuffled_archetypes(&mut rng));
    }
    assigned.truncate(line_count);
    assigned
}

/// Archetype per line of `group`.
///
/// Starts from the seeded assignment, then lines whose font slot pins an
/// `animationType` take that archetype. A policy that supplies animations
/// replaces the result entirely.
pub fn assign_for_group(
    group: &Group,
    style: &SubtitleStyleConfig,
    policy: Option<&dyn LayoutPolicy>,
) -> Result<Vec<AnimationType>, RenderError> {
    if let Some(animations) = policy.and_then(|p| p.animations(group, style)) {
        if animations.len() != group.lines.len() {
            return Err(RenderError::LayoutError(format!(
                "layout policy returned {} animations for {} lines",
                animations.len(),
                group.lines.len()
            )));
        }
        return Ok(animations);
    }

    let mut animations = assign_animations(group.start_time, group.lines.len());
    for (animation, line) in animations.iter_mut().zip(&group.lines) {
        if let Some(pinned) = style.fonts.get(line.font_type).animation_type {
            *animation = pinned;
        }
    }
    Ok(animations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn seed_key_matches_fixed_point_formatting() {
        assert_eq!(seed_key(10.0), "10.000");
        assert_eq!(seed_key(1.23456), "1.235");
        assert_eq!(seed_key(0.0625), "0.063");
        assert_eq!(seed_key(2.5625), "2.563");
        assert_eq!(seed_key(-0.0625), "-0.063");
        assert_eq!(seed_key(-0.0), "0.000");
        // 1.0005 is stored slightly below the tie.
        assert_eq!(seed_key(1.0005), "1.000");
    }

    #[test]
    fn rolling_hash_wraps() {
        assert_eq!(rolling_hash(""), 0);
        assert_eq!(rolling_hash("0"), 48);
        assert_eq!(rolling_hash("10"), 49 * 31 + 48);
        // Long keys overflow 32 bits without panicking.
        let _ = rolling_hash("12345678901234567890.000");
    }

    #[test]
    fn generator_sequence() {
        let mut rng = SeededRandom::new(0);
        assert_eq!(rng.next_f64(), 49297.0 / 233_280.0);
        let expected = (49297 * 9301 + 49297) % 233_280;
        assert_eq!(rng.next_f64(), f64::from(expected) / 233_280.0);
    }

    #[test]
    fn same_start_same_sequence() {
        assert_eq!(assign_animations(12.5, 4), assign_animations(12.5, 4));
        assert_eq!(assign_animations(12.5, 4), assign_animations(12.5004, 4));
    }

    #[test]
    fn one_pass_is_a_permutation() {
        let mut assigned = assign_animations(3.25, 6);
        assigned.sort_by_key(|a| a.as_str());
        let mut all = AnimationType::ALL.to_vec();
        all.sort_by_key(|a| a.as_str());
        assert_eq!(assigned, all);
    }

    #[test]
    fn prefixes_agree() {
        let long = assign_animations(7.0, 14);
        assert_eq!(&long[..3], assign_animations(7.0, 3).as_slice());
        assert!(assign_animations(7.0, 0).is_empty());
    }

    #[test]
    fn pinned_slots_override_seeded_choice() {
        use caption_core::{resolve_style, FontType, Line};

        let style = resolve_style("combined-animation", None);
        let line = |font_type| Line {
            id: "l".into(),
            start_time: 4.0,
            end_time: 5.0,
            font_type,
            words: Vec::new(),
        };
        let group = Group {
            id: "g".into(),
            start_time: 4.0,
            end_time: 5.0,
            lines: vec![line(FontType::Bold), line(FontType::Thin), line(FontType::Normal)],
        };
        let seeded = assign_animations(4.0, 3);
        let assigned = assign_for_group(&group, &style, None).unwrap();
        assert_eq!(assigned[0], seeded[0]);
        assert_eq!(assigned[1], AnimationType::FadeBlur);
        assert_eq!(assigned[2], seeded[2]);
    }

    proptest! {
        #[test]
        fn every_pass_reuses_the_full_set(start in 0.0f64..3600.0, passes in 1usize..4) {
            let assigned = assign_animations(start, passes * 6);
            for chunk in assigned.chunks(6) {
                for animation in AnimationType::ALL {
                    prop_assert!(chunk.contains(&animation));
                }
            }
        }

        #[test]
        fn assignment_is_deterministic(start in -100.0f64..3600.0, lines in 0usize..20) {
            prop_assert_eq!(assign_animations(start, lines), assign_animations(start, lines));
        }
    }
}
