//! Game configuration
//!
//! Built once at startup and passed by reference into the game loop. Nothing here
//! changes while the game runs.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Playback volume for each sound cue (0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CueVolumes {
    pub flap: f32,
    pub score: f32,
    pub death: f32,
}

impl Default for CueVolumes {
    fn default() -> Self {
        Self {
            flap: 0.2,
            score: 0.3,
            death: 0.3,
        }
    }
}

/// Immutable game configuration (geometry, physics, rules, HUD, audio)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub tile_size: f32,
    pub target_fps: u32,

    // === Player ===
    /// Sprite size; the hitbox circle is centred on it
    pub player_size: Vec2,
    pub player_draw_x: f32,
    pub player_hitbox_radius: f32,
    /// Horizontal reference the score line is measured from
    pub player_score_x: f32,
    pub player_start_y: f32,
    pub ceiling_limit: f32,
    pub ground_band_height: f32,
    pub gravity: f32,
    pub flap_speed: f32,

    // === Obstacles ===
    pub scroll_speed: i32,
    pub ground_base_y: i32,
    pub ceiling_base_y: i32,
    /// First ground extension; further extensions step upward by one tile
    pub ground_extension_start: i32,
    /// First ceiling extension; further extensions step downward by one tile
    pub ceiling_extension_start: i32,
    /// Exclusive lower bounds the ground stack is drawn from
    pub ground_bounds: [i32; 2],
    /// Exclusive upper bounds the ceiling stack is drawn from
    pub ceiling_bounds: [i32; 2],
    pub exit_sentinel: i32,
    pub spawn_offset_tiles: i32,
    /// Width of the edge segments used as obstacle hitboxes
    pub hitbox_line_width: f32,

    // === Rules ===
    pub near_floor_threshold: f32,
    pub score_offset: f32,
    pub death_drop_step: f32,

    // === HUD ===
    pub start_button_radius: f32,
    pub cursor_radius: f32,
    pub font_size: f32,
    pub score_text_pos: Vec2,
    pub high_score_text_pos: Vec2,

    // === Audio ===
    pub volumes: CueVolumes,
    /// Longest the flap cue may ring before it is cut
    pub flap_cue_max_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            tile_size: TILE_SIZE,
            target_fps: TARGET_FPS,

            player_size: Vec2::splat(PLAYER_SPRITE_SIZE),
            player_draw_x: PLAYER_DRAW_X,
            player_hitbox_radius: TILE_SIZE / 2.0,
            player_score_x: PLAYER_SCORE_X,
            player_start_y: PLAYER_START_Y,
            ceiling_limit: CEILING_LIMIT,
            ground_band_height: GROUND_BAND_HEIGHT,
            gravity: GRAVITY,
            flap_speed: FLAP_SPEED,

            scroll_speed: SCROLL_SPEED,
            ground_base_y: 576,
            ceiling_base_y: 0,
            ground_extension_start: 512,
            ceiling_extension_start: 64,
            ground_bounds: [448, 384],
            ceiling_bounds: [128, 192],
            exit_sentinel: EXIT_SENTINEL,
            spawn_offset_tiles: SPAWN_OFFSET_TILES,
            hitbox_line_width: 4.0,

            near_floor_threshold: NEAR_FLOOR_THRESHOLD,
            score_offset: SCORE_OFFSET,
            death_drop_step: DEATH_DROP_STEP,

            start_button_radius: TILE_SIZE,
            cursor_radius: 5.0,
            font_size: TILE_SIZE,
            score_text_pos: Vec2::new(PLAYFIELD_WIDTH * 0.69 - TILE_SIZE * 2.0, 0.0),
            high_score_text_pos: Vec2::new(0.0, PLAYFIELD_HEIGHT - GROUND_BAND_HEIGHT),

            volumes: CueVolumes::default(),
            flap_cue_max_ms: 1000,
        }
    }
}

impl GameConfig {
    /// Lowest y the player may occupy
    pub fn floor_limit(&self) -> f32 {
        self.playfield_height - self.player_size.y - self.ground_band_height
    }

    /// Top of the ground tile row (second-to-last grid row)
    pub fn ground_row_y(&self) -> f32 {
        self.playfield_height - 2.0 * self.tile_size
    }

    /// Top of the filled band below the ground row (last grid row)
    pub fn ground_fill_y(&self) -> f32 {
        self.playfield_height - self.tile_size
    }

    /// Obstacle x at which the pair counts as passed
    pub fn score_line(&self) -> f32 {
        self.player_score_x - self.score_offset
    }

    /// Obstacle x at the start of every session
    pub fn session_spawn_x(&self) -> i32 {
        self.playfield_width as i32 + self.tile_size as i32 * self.spawn_offset_tiles
    }

    /// Obstacle x after it is recycled at the left sentinel
    pub fn respawn_x(&self) -> i32 {
        self.playfield_width as i32
    }

    /// Centre of the player hitbox for a given player y
    pub fn player_center(&self, y: f32) -> Vec2 {
        Vec2::new(
            self.player_draw_x + self.player_size.x / 2.0,
            y + self.player_size.y / 2.0,
        )
    }

    pub fn start_button_center(&self) -> Vec2 {
        Vec2::new(self.playfield_width / 2.0, self.playfield_height / 2.0)
    }

    /// Top-left corner and size of the start button sprite
    pub fn start_button_rect(&self) -> (Vec2, Vec2) {
        let r = self.start_button_radius;
        (self.start_button_center() - Vec2::splat(r), Vec2::splat(2.0 * r))
    }

    /// Duration of one frame in seconds
    pub fn frame_secs(&self) -> f64 {
        1.0 / self.target_fps as f64
    }

    /// Reject geometry that could produce an impassable gap or a floor the player
    /// can never touch
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_size <= 0.0 || self.scroll_speed <= 0 {
            return Err(ConfigError::NonPositiveStep);
        }
        if self.target_fps == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }

        let tile = self.tile_size as i32;
        for bound in self.ground_bounds {
            if bound >= self.ground_extension_start {
                return Err(ConfigError::EmptyExtensions { bound });
            }
        }
        for bound in self.ceiling_bounds {
            if bound <= self.ceiling_extension_start {
                return Err(ConfigError::EmptyExtensions { bound });
            }
        }

        // Narrowest channel: highest ground cap against lowest ceiling cap
        let ground_cap_top = self
            .ground_bounds
            .iter()
            .map(|&b| last_descending(self.ground_extension_start, b, tile) - tile)
            .min()
            .unwrap_or(self.ground_base_y);
        let ceiling_cap_bottom = self
            .ceiling_bounds
            .iter()
            .map(|&b| last_ascending(self.ceiling_extension_start, b, tile) + 2 * tile)
            .max()
            .unwrap_or(self.ceiling_base_y);
        let gap = (ground_cap_top - ceiling_cap_bottom) as f32;
        if gap < self.player_size.y {
            return Err(ConfigError::GapTooNarrow {
                gap,
                player_height: self.player_size.y,
            });
        }

        let floor = self.floor_limit();
        if self.near_floor_threshold >= floor || self.near_floor_threshold < self.ceiling_limit {
            return Err(ConfigError::UnreachableFloor {
                threshold: self.near_floor_threshold,
                floor_limit: floor,
            });
        }

        if (self.exit_sentinel - self.respawn_x()) % self.scroll_speed != 0 {
            return Err(ConfigError::MisalignedSentinel {
                sentinel: self.exit_sentinel,
                scroll_speed: self.scroll_speed,
            });
        }

        Ok(())
    }
}

fn last_descending(start: i32, bound: i32, step: i32) -> i32 {
    let mut y = start;
    while y - step > bound {
        y -= step;
    }
    y
}

fn last_ascending(start: i32, bound: i32, step: i32) -> i32 {
    let mut y = start;
    while y + step < bound {
        y += step;
    }
    y
}

/// Configuration rejected by [`GameConfig::validate`]
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositiveStep,
    ZeroFrameRate,
    EmptyExtensions { bound: i32 },
    GapTooNarrow { gap: f32, player_height: f32 },
    UnreachableFloor { threshold: f32, floor_limit: f32 },
    MisalignedSentinel { sentinel: i32, scroll_speed: i32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveStep => write!(f, "tile size and scroll speed must be positive"),
            Self::ZeroFrameRate => write!(f, "target frame rate must be non-zero"),
            Self::EmptyExtensions { bound } => {
                write!(f, "extension bound {bound} leaves an empty pipe stack")
            }
            Self::GapTooNarrow { gap, player_height } => write!(
                f,
                "narrowest gap {gap}px is smaller than the player ({player_height}px)"
            ),
            Self::UnreachableFloor {
                threshold,
                floor_limit,
            } => write!(
                f,
                "near-floor threshold {threshold} is outside the player's range (floor {floor_limit})"
            ),
            Self::MisalignedSentinel {
                sentinel,
                scroll_speed,
            } => write!(
                f,
                "exit sentinel {sentinel} is not reachable in steps of {scroll_speed}px"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
