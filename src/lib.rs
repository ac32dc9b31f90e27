//! Flappy - A side-scrolling pipe-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game state)
//! - `input`: Raw key/pointer events to semantic actions
//! - `platform`: Render/audio/input/timing ports the game loop talks to
//! - `renderer`: Scene drawing and the WebGPU presenter
//! - `game`: Frame loop driver (poll → tick → cues → draw → present → wait)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod autopilot;
pub mod config;
pub mod game;
pub mod highscores;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, CueVolumes, GameConfig};
pub use game::{Game, LoopControl};
pub use highscores::SessionScore;

/// Reference playfield geometry; `GameConfig::default()` is built from these
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 576.0;
    pub const PLAYFIELD_HEIGHT: f32 = 768.0;
    /// Grid tile size; pipes, ground and text are laid out on this grid
    pub const TILE_SIZE: f32 = 64.0;
    /// Target frame rate for pacing
    pub const TARGET_FPS: u32 = 60;

    /// Player sprite is two tiles square and drawn flush with the left edge
    pub const PLAYER_SPRITE_SIZE: f32 = 128.0;
    pub const PLAYER_DRAW_X: f32 = 0.0;
    /// Horizontal reference for scoring (centre of the playfield)
    pub const PLAYER_SCORE_X: f32 = PLAYFIELD_WIDTH / 2.0;
    pub const PLAYER_START_Y: f32 = PLAYFIELD_HEIGHT / 2.0 - TILE_SIZE;
    /// Player may rise half a tile past the top edge
    pub const CEILING_LIMIT: f32 = -32.0;
    /// Band kept clear of the player at the bottom of the playfield
    pub const GROUND_BAND_HEIGHT: f32 = 72.0;

    pub const GRAVITY: f32 = 1.0;
    pub const FLAP_SPEED: f32 = 10.0;

    /// Obstacle scroll speed (pixels per frame)
    pub const SCROLL_SPEED: i32 = 8;
    /// Obstacle is recycled once its x reaches this value
    pub const EXIT_SENTINEL: i32 = -64;
    /// New sessions place the obstacle this many tiles beyond the right edge
    pub const SPAWN_OFFSET_TILES: i32 = 8;

    /// Player y beyond which ground contact counts
    pub const NEAR_FLOOR_THRESHOLD: f32 = 560.0;
    /// Obstacle is scored once `x + SCORE_OFFSET` reaches the player's score x
    pub const SCORE_OFFSET: f32 = 320.0;
    /// Death animation fall per frame
    pub const DEATH_DROP_STEP: f32 = 16.0;
}
