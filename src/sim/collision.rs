//! Hitboxes and overlap tests
//!
//! The player is a circle, tested by its bounding square like every other
//! shape: all overlap checks are axis-aligned box tests. Pipes are thin segments along each tile's leading
//! (left) edge, with an L-shaped cap at the open end of each stack. Ground is the
//! row of tile rectangles under the playfield. Hitboxes are rebuilt from current
//! geometry every frame and never cached.

use glam::Vec2;

use super::obstacle::ObstaclePair;
use crate::config::GameConfig;

/// Who a hitbox belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitboxOwner {
    Player,
    /// Pipe segment: base, extension or cap
    Obstacle,
    Ground,
}

/// Collision geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { center: Vec2, radius: f32 },
    /// Axis-aligned rectangle from its top-left corner
    Rect { min: Vec2, size: Vec2 },
    /// Line segment with thickness
    Segment { from: Vec2, to: Vec2, width: f32 },
}

/// A tagged shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub owner: HitboxOwner,
    pub shape: Shape,
}

impl Hitbox {
    pub fn new(owner: HitboxOwner, shape: Shape) -> Self {
        Self { owner, shape }
    }

    /// Axis-aligned bounds as `(min, max)`. Circles are bounded by their square
    /// and segments are padded by half their width on every side.
    pub fn bounds(&self) -> (Vec2, Vec2) {
        match self.shape {
            Shape::Circle { center, radius } => (center - radius, center + radius),
            Shape::Rect { min, size } => (min, min + size),
            Shape::Segment { from, to, width } => {
                let pad = Vec2::splat(width / 2.0);
                (from.min(to) - pad, from.max(to) + pad)
            }
        }
    }

    /// Bounding-box overlap with another hitbox of any shape; touching edges
    /// do not count
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        let (a_min, a_max) = self.bounds();
        let (b_min, b_max) = other.bounds();
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }
}

/// The player's circle for a given y
pub fn player_hitbox(y: f32, config: &GameConfig) -> Hitbox {
    Hitbox::new(
        HitboxOwner::Player,
        Shape::Circle {
            center: config.player_center(y),
            radius: config.player_hitbox_radius,
        },
    )
}

/// Ground tile rectangles across the playfield
pub fn ground_hitboxes(config: &GameConfig) -> Vec<Hitbox> {
    let tile = config.tile_size;
    let y = config.ground_row_y();
    let columns = (config.playfield_width / tile).ceil() as usize;
    (0..columns)
        .map(|i| {
            Hitbox::new(
                HitboxOwner::Ground,
                Shape::Rect {
                    min: Vec2::new(i as f32 * tile, y),
                    size: Vec2::splat(tile),
                },
            )
        })
        .collect()
}

/// Leading-edge segments for every tile of both stacks, plus the two caps
pub fn obstacle_hitboxes(obstacle: &ObstaclePair, config: &GameConfig) -> Vec<Hitbox> {
    let tile = config.tile_size;
    let width = config.hitbox_line_width;
    let x = obstacle.x as f32;
    let edge = |top: f32| {
        Hitbox::new(
            HitboxOwner::Obstacle,
            Shape::Segment {
                from: Vec2::new(x, top),
                to: Vec2::new(x, top + tile),
                width,
            },
        )
    };
    let span = |from: Vec2, to: Vec2| {
        Hitbox::new(HitboxOwner::Obstacle, Shape::Segment { from, to, width })
    };

    let mut boxes = Vec::with_capacity(
        obstacle.ground_extensions.len() + obstacle.ceiling_extensions.len() + 6,
    );

    // Ground stack: base, extensions, then an L cap (left edge + top edge)
    boxes.push(edge(config.ground_base_y as f32));
    boxes.extend(obstacle.ground_extensions.iter().map(|&y| edge(y as f32)));
    let cap = obstacle.ground_cap_y(tile as i32) as f32;
    boxes.push(span(Vec2::new(x, cap + tile), Vec2::new(x, cap)));
    boxes.push(span(Vec2::new(x, cap), Vec2::new(x + tile, cap)));

    // Ceiling stack: base, extensions, then an L cap (left edge + bottom edge)
    boxes.push(edge(config.ceiling_base_y as f32));
    boxes.extend(obstacle.ceiling_extensions.iter().map(|&y| edge(y as f32)));
    let cap = obstacle.ceiling_cap_y(tile as i32) as f32;
    boxes.push(span(Vec2::new(x, cap), Vec2::new(x, cap + tile)));
    boxes.push(span(Vec2::new(x, cap + tile), Vec2::new(x + tile, cap + tile)));

    boxes
}

/// Report whether the player hits a pipe, or the ground once near the floor
pub fn detect(
    player: &Hitbox,
    player_y: f32,
    obstacle_hitboxes: &[Hitbox],
    ground_hitboxes: &[Hitbox],
    config: &GameConfig,
) -> bool {
    if obstacle_hitboxes.iter().any(|h| h.overlaps(player)) {
        return true;
    }
    player_y > config.near_floor_threshold && ground_hitboxes.iter().any(|h| h.overlaps(player))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair_at(x: i32) -> ObstaclePair {
        ObstaclePair {
            x,
            ground_extensions: vec![512, 448],
            ceiling_extensions: vec![64, 128],
        }
    }

    fn ground_tile() -> Hitbox {
        Hitbox::new(
            HitboxOwner::Ground,
            Shape::Rect {
                min: Vec2::new(0.0, 640.0),
                size: Vec2::splat(64.0),
            },
        )
    }

    fn circle(center: Vec2) -> Hitbox {
        Hitbox::new(HitboxOwner::Player, Shape::Circle { center, radius: 32.0 })
    }

    #[test]
    fn test_segment_bounds_padded_by_half_width() {
        let seg = Hitbox::new(
            HitboxOwner::Obstacle,
            Shape::Segment {
                from: Vec2::new(84.0, 256.0),
                to: Vec2::new(20.0, 256.0),
                width: 4.0,
            },
        );
        assert_eq!(seg.bounds(), (Vec2::new(18.0, 254.0), Vec2::new(86.0, 258.0)));
    }

    #[test]
    fn test_circle_rect_overlap() {
        let rect = ground_tile();
        assert!(rect.overlaps(&circle(Vec2::new(32.0, 620.0))));
        // Exactly touching the top edge is not a hit
        assert!(!rect.overlaps(&circle(Vec2::new(32.0, 608.0))));
    }

    #[test]
    fn test_circle_square_corner_counts() {
        // Diagonal from the tile corner: the round edge misses, the bounding square does not
        let rect = ground_tile();
        let center = Vec2::new(-25.0, 615.0);
        assert!(center.distance(Vec2::new(0.0, 640.0)) > 32.0);
        let near_corner = circle(center);
        assert!(rect.overlaps(&near_corner));
        assert!(near_corner.overlaps(&rect));
    }

    #[test]
    fn test_overlap_without_circles() {
        let edge = Hitbox::new(
            HitboxOwner::Obstacle,
            Shape::Segment {
                from: Vec2::new(10.0, 600.0),
                to: Vec2::new(10.0, 664.0),
                width: 4.0,
            },
        );
        assert!(edge.overlaps(&ground_tile()));
        assert!(ground_tile().overlaps(&edge));

        let above = Hitbox::new(
            HitboxOwner::Obstacle,
            Shape::Segment {
                from: Vec2::new(10.0, 500.0),
                to: Vec2::new(10.0, 560.0),
                width: 4.0,
            },
        );
        assert!(!above.overlaps(&ground_tile()));
    }

    #[test]
    fn test_obstacle_hitbox_count() {
        let config = GameConfig::default();
        let boxes = obstacle_hitboxes(&pair_at(200), &config);
        // base + 2 extensions + 2 cap edges, per stack
        assert_eq!(boxes.len(), 10);
        assert!(boxes.iter().all(|h| h.owner == HitboxOwner::Obstacle));
    }

    #[test]
    fn test_player_in_gap_is_clear() {
        let config = GameConfig::default();
        // Gap spans y 256..384; centre the circle on 320
        let player_y = 320.0 - config.player_size.y / 2.0;
        let player = player_hitbox(player_y, &config);
        let obstacles = obstacle_hitboxes(&pair_at(40), &config);
        let ground = ground_hitboxes(&config);
        assert!(!detect(&player, player_y, &obstacles, &ground, &config));
    }

    #[test]
    fn test_player_hits_ground_cap() {
        let config = GameConfig::default();
        // Circle centre at y 400 dips below the ground cap top (384)
        let player_y = 400.0 - config.player_size.y / 2.0;
        let player = player_hitbox(player_y, &config);
        let obstacles = obstacle_hitboxes(&pair_at(40), &config);
        assert!(detect(&player, player_y, &obstacles, &[], &config));
    }

    #[test]
    fn test_player_hits_leading_edge() {
        let config = GameConfig::default();
        let player_y = 100.0;
        let player = player_hitbox(player_y, &config);
        // Ceiling extension at y 128 sits beside the circle (centre 164)
        let obstacles = obstacle_hitboxes(&pair_at(90), &config);
        assert!(detect(&player, player_y, &obstacles, &[], &config));
    }

    #[test]
    fn test_far_obstacle_never_hits() {
        let config = GameConfig::default();
        let player = player_hitbox(320.0, &config);
        let obstacles = obstacle_hitboxes(&pair_at(400), &config);
        assert!(!detect(&player, 320.0, &obstacles, &[], &config));
    }

    #[test]
    fn test_player_square_catches_ground_cap_corner() {
        let config = GameConfig::default();
        // Circle centre (64, 360); the cap's top edge starts at (92, 384),
        // inside the bounding square but outside the circle itself
        let player_y = 296.0;
        let player = player_hitbox(player_y, &config);
        let obstacles = obstacle_hitboxes(&pair_at(92), &config);
        assert!(detect(&player, player_y, &obstacles, &[], &config));
    }

    #[test]
    fn test_player_touches_ceiling_cap_bottom_edge() {
        let config = GameConfig::default();
        // Leading edges at x 20 sit left of the player square (x 32..96), so only
        // the cap's bottom edge (x 20..84 at y 256) is in reach
        let obstacles = obstacle_hitboxes(&pair_at(20), &config);
        let cap = pair_at(20).ceiling_cap_y(config.tile_size as i32) as f32;
        assert_eq!(cap + config.tile_size, 256.0);

        let player_y = 220.0;
        let player = player_hitbox(player_y, &config);
        assert!(detect(&player, player_y, &obstacles, &[], &config));
    }

    #[test]
    fn test_player_just_below_ceiling_cap_is_clear() {
        let config = GameConfig::default();
        let obstacles = obstacle_hitboxes(&pair_at(20), &config);
        // Square top at 262, below the bottom edge's lower side at 258
        let player_y = 230.0;
        let player = player_hitbox(player_y, &config);
        assert!(!detect(&player, player_y, &obstacles, &[], &config));
    }

    #[test]
    fn test_ground_needs_near_floor_threshold() {
        let config = GameConfig::default();
        let ground = ground_hitboxes(&config);
        assert_eq!(ground.len(), 9);

        // Circle already overlaps the ground row but the player is above the threshold
        let airborne = player_hitbox(555.0, &config);
        assert!(!detect(&airborne, 555.0, &[], &ground, &config));

        let landed = player_hitbox(568.0, &config);
        assert!(detect(&landed, 568.0, &[], &ground, &config));
    }
}
