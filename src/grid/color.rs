//! Course color assignment.
//!
//! Every course in a grid gets a light background so the course text stays legible.
//! Two policies exist: a content hash (the same course always gets the same hue) and
//! a random draw (the color changes each time a grid is built).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use super::types::Color;

/// Minimum saturation (percent) of any course color
pub const MIN_SATURATION: u8 = 70;
/// Minimum lightness (percent) of any course color
pub const MIN_LIGHTNESS: u8 = 80;

/// Maps a course identity key to a background color
pub trait ColorAssigner {
    fn color_for(&mut self, key: &str) -> Color;
}

/// Which assigner a grid build should use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorPolicy {
    #[default]
    Hash,
    Random,
}

impl ColorPolicy {
    /// `seed` only affects the random policy
    pub fn assigner(self, seed: Option<u64>) -> Box<dyn ColorAssigner> {
        match (self, seed) {
            (ColorPolicy::Hash, _) => Box::new(HashColorAssigner),
            (ColorPolicy::Random, Some(seed)) => Box::new(RandomColorAssigner::seeded(seed)),
            (ColorPolicy::Random, None) => Box::new(RandomColorAssigner::new()),
        }
    }
}

/// Derives the hue from a hash of the course text. Stable across builds and processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashColorAssigner;

impl HashColorAssigner {
    /// `hash = unit + ((hash << 5) - hash)` over UTF-16 code units. Only the shift
    /// operates on 32 bits; the running sum is kept wide and never wraps.
    fn text_hash(text: &str) -> i64 {
        text.encode_utf16().fold(0i64, |hash, unit| {
            let shifted = (hash as i32).wrapping_shl(5) as i64;
            unit as i64 + shifted - hash
        })
    }
}

impl ColorAssigner for HashColorAssigner {
    fn color_for(&mut self, key: &str) -> Color {
        if key.is_empty() {
            return Color::Neutral;
        }
        let hue = (Self::text_hash(key).unsigned_abs() % 360) as u16;
        Color::Hsl { hue, saturation: MIN_SATURATION, lightness: MIN_LIGHTNESS }
    }
}

/// Draws a fresh light color on every call
pub struct RandomColorAssigner {
    rng: StdRng,
}

impl RandomColorAssigner {
    pub fn new() -> Self {
        RandomColorAssigner { rng: StdRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomColorAssigner { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for RandomColorAssigner {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorAssigner for RandomColorAssigner {
    fn color_for(&mut self, key: &str) -> Color {
        if key.is_empty() {
            return Color::Neutral;
        }
        Color::Hsl {
            hue: self.rng.gen_range(0..360),
            saturation: self.rng.gen_range(MIN_SATURATION..100),
            lightness: self.rng.gen_range(MIN_LIGHTNESS..100),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_light(color: Color) {
        match color {
            Color::Hsl { hue, saturation, lightness } => {
                assert!(hue < 360);
                assert!(saturation >= MIN_SATURATION && saturation <= 100);
                assert!(lightness >= MIN_LIGHTNESS && lightness <= 100);
            }
            Color::Neutral => panic!("expected a course color, got neutral"),
        }
    }

    #[test]
    fn test_hash_color_is_stable_across_instances() {
        let a = HashColorAssigner.color_for("CS101 - Programming");
        let b = HashColorAssigner.color_for("CS101 - Programming");
        assert_eq!(a, b);
        assert_light(a);
    }

    #[test]
    fn test_hash_color_known_values() {
        // "a" hashes to 97, "ab" to 97 * 31 + 98 = 3105
        assert_eq!(
            HashColorAssigner.color_for("a"),
            Color::Hsl { hue: 97, saturation: 70, lightness: 80 }
        );
        assert_eq!(
            HashColorAssigner.color_for("ab"),
            Color::Hsl { hue: 3105 % 360, saturation: 70, lightness: 80 }
        );
    }

    #[test]
    fn test_hash_color_for_long_keys() {
        // Long keys push the shifted term past 32 bits; the sum itself must not wrap
        assert_eq!(
            HashColorAssigner.color_for("CS101 - Programming Fundamentals"),
            Color::Hsl { hue: 78, saturation: 70, lightness: 80 }
        );
        assert_eq!(
            HashColorAssigner.color_for("MT101 - Calculus"),
            Color::Hsl { hue: 214, saturation: 70, lightness: 80 }
        );
    }

    #[test]
    fn test_hash_color_survives_overflow() {
        let long_key = "MT-4021 - Advanced Partial Differential Equations and Applications";
        assert_light(HashColorAssigner.color_for(long_key));
    }

    #[test]
    fn test_empty_key_is_neutral() {
        assert_eq!(HashColorAssigner.color_for(""), Color::Neutral);
        assert_eq!(RandomColorAssigner::seeded(1).color_for(""), Color::Neutral);
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let mut a = RandomColorAssigner::seeded(42);
        let mut b = RandomColorAssigner::seeded(42);
        for key in ["CS101 - Programming", "MT101 - Calculus", "PH101 - Physics"] {
            let color = a.color_for(key);
            assert_eq!(color, b.color_for(key));
            assert_light(color);
        }
    }

    #[test]
    fn test_policy_seed_applies_to_random_only() {
        let key = "CS101 - Programming";
        let a = ColorPolicy::Random.assigner(Some(9)).color_for(key);
        let b = ColorPolicy::Random.assigner(Some(9)).color_for(key);
        assert_eq!(a, b);
        assert_eq!(
            ColorPolicy::Hash.assigner(Some(9)).color_for(key),
            HashColorAssigner.color_for(key)
        );
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::Neutral.to_string(), "white");
        let color = Color::Hsl { hue: 12, saturation: 70, lightness: 80 };
        assert_eq!(color.to_string(), "hsl(12, 70%, 80%)");
    }
}
