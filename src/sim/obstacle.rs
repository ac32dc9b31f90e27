//! Obstacle pair and gap generation
//!
//! A pair is two pipe stacks sharing one x: a ground-rooted stack growing up
//! from the ground base and a ceiling-rooted stack growing down from the top.
//! Each stack is `base + extensions + cap`; only the extension counts are random.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// One pipe pair at a shared horizontal scroll position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstaclePair {
    /// Left edge of every segment in the pair
    pub x: i32,
    /// y of each ground extension segment, top-most last
    pub ground_extensions: Vec<i32>,
    /// y of each ceiling extension segment, bottom-most last
    pub ceiling_extensions: Vec<i32>,
}

impl ObstaclePair {
    /// y of the ground stack's cap (one tile above its top-most extension)
    pub fn ground_cap_y(&self, tile: i32) -> i32 {
        self.ground_extensions.last().copied().unwrap_or_default() - tile
    }

    /// y of the ceiling stack's cap (one tile below its bottom-most extension)
    pub fn ceiling_cap_y(&self, tile: i32) -> i32 {
        self.ceiling_extensions.last().copied().unwrap_or_default() + tile
    }

    /// Height of the open channel between the two caps
    pub fn gap_height(&self, tile: i32) -> i32 {
        self.ground_cap_y(tile) - (self.ceiling_cap_y(tile) + tile)
    }

    /// Vertical centre of the open channel
    pub fn gap_center(&self, tile: i32) -> f32 {
        let top = self.ceiling_cap_y(tile) + tile;
        let bottom = self.ground_cap_y(tile);
        (top + bottom) as f32 / 2.0
    }
}

/// Seeded source of pipe gaps
#[derive(Debug, Clone)]
pub struct ObstacleGenerator {
    rng: Pcg32,
}

impl ObstacleGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Draw a fresh pair of extension sequences
    ///
    /// The ground and ceiling bounds are drawn independently and uniformly from
    /// their two presets. Panics if the result would leave less than one player
    /// height of open channel, which a validated config cannot produce.
    pub fn generate_gap(&mut self, config: &GameConfig) -> (Vec<i32>, Vec<i32>) {
        let tile = config.tile_size as i32;
        let ground_bound = config.ground_bounds[self.rng.random_range(0..config.ground_bounds.len())];
        let ceiling_bound =
            config.ceiling_bounds[self.rng.random_range(0..config.ceiling_bounds.len())];

        let ground = descending(config.ground_extension_start, ground_bound, tile);
        let ceiling = ascending(config.ceiling_extension_start, ceiling_bound, tile);

        assert!(
            !ground.is_empty() && !ceiling.is_empty(),
            "pipe stacks need at least one extension"
        );
        let pair = ObstaclePair {
            x: 0,
            ground_extensions: ground,
            ceiling_extensions: ceiling,
        };
        assert!(
            pair.gap_height(tile) as f32 >= config.player_size.y,
            "gap of {}px cannot fit the player",
            pair.gap_height(tile)
        );

        (pair.ground_extensions, pair.ceiling_extensions)
    }

    /// Build a whole pair at `x` with a freshly drawn gap
    pub fn spawn(&mut self, x: i32, config: &GameConfig) -> ObstaclePair {
        let (ground_extensions, ceiling_extensions) = self.generate_gap(config);
        ObstaclePair {
            x,
            ground_extensions,
            ceiling_extensions,
        }
    }
}

/// `start, start - step, ...` while strictly above `bound`
fn descending(start: i32, bound: i32, step: i32) -> Vec<i32> {
    let mut out = Vec::new();
    let mut y = start;
    while y > bound {
        out.push(y);
        y -= step;
    }
    out
}

/// `start, start + step, ...` while strictly below `bound`
fn ascending(start: i32, bound: i32, step: i32) -> Vec<i32> {
    let mut out = Vec::new();
    let mut y = start;
    while y < bound {
        out.push(y);
        y += step;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extension_sequences() {
        assert_eq!(descending(512, 448, 64), vec![512]);
        assert_eq!(descending(512, 384, 64), vec![512, 448]);
        assert_eq!(ascending(64, 128, 64), vec![64]);
        assert_eq!(ascending(64, 192, 64), vec![64, 128]);
    }

    #[test]
    fn test_same_seed_same_gaps() {
        let config = GameConfig::default();
        let mut a = ObstacleGenerator::new(7);
        let mut b = ObstacleGenerator::new(7);
        for _ in 0..32 {
            assert_eq!(a.generate_gap(&config), b.generate_gap(&config));
        }
    }

    #[test]
    fn test_all_presets_eventually_drawn() {
        let config = GameConfig::default();
        let mut generator = ObstacleGenerator::new(42);
        let mut ground_lens = [false; 3];
        let mut ceiling_lens = [false; 3];
        for _ in 0..200 {
            let (ground, ceiling) = generator.generate_gap(&config);
            ground_lens[ground.len()] = true;
            ceiling_lens[ceiling.len()] = true;
        }
        assert_eq!(ground_lens, [false, true, true]);
        assert_eq!(ceiling_lens, [false, true, true]);
    }

    #[test]
    fn test_gap_geometry() {
        let pair = ObstaclePair {
            x: 100,
            ground_extensions: vec![512, 448],
            ceiling_extensions: vec![64, 128],
        };
        assert_eq!(pair.ground_cap_y(64), 384);
        assert_eq!(pair.ceiling_cap_y(64), 192);
        assert_eq!(pair.gap_height(64), 128);
        assert_eq!(pair.gap_center(64), 320.0);
    }

    proptest! {
        #[test]
        fn prop_gap_bounds_hold_for_any_seed(seed in any::<u64>()) {
            let config = GameConfig::default();
            let mut generator = ObstacleGenerator::new(seed);
            let (ground, ceiling) = generator.generate_gap(&config);

            prop_assert!(!ground.is_empty());
            prop_assert!(!ceiling.is_empty());
            prop_assert_eq!(ground[0], 512);
            prop_assert_eq!(ceiling[0], 64);

            // The exclusive bound sits one tile past the last extension
            let ground_bound = ground.last().unwrap() - 64;
            let ceiling_bound = ceiling.last().unwrap() + 64;
            prop_assert!(ground_bound == 448 || ground_bound == 384);
            prop_assert!(ceiling_bound == 128 || ceiling_bound == 192);
        }
    }
}
