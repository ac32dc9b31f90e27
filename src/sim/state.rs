//! Game state and core simulation types

use serde::{Deserialize, Serialize};

use super::obstacle::{ObstacleGenerator, ObstaclePair};
use crate::config::GameConfig;
use crate::highscores::SessionScore;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Waiting for the start button; shows the high score
    #[default]
    StartScreen,
    /// Gameplay: physics, scrolling pipes, scoring, collisions
    Active,
    /// Death drop animation; ignores gameplay input
    Dying,
}

/// The player's bird
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Top edge of the sprite
    pub y: f32,
    /// Pixels per frame, positive is downward
    pub velocity: f32,
    /// Upward speed a flap sets
    pub flap_speed: f32,
    /// Flap key currently held (selects the flap sprite)
    pub flapping: bool,
}

impl PlayerState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            y: config.player_start_y,
            velocity: 0.0,
            flap_speed: config.flap_speed,
            flapping: false,
        }
    }

    /// Back to the start position with no motion
    pub fn reset(&mut self, config: &GameConfig) {
        self.y = config.player_start_y;
        self.velocity = 0.0;
        self.flap_speed = config.flap_speed;
    }
}

/// Things that happened during a tick, consumed by audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A session began
    SessionStarted,
    /// Flap impulse applied
    Flapped,
    /// A pipe pair was passed
    Scored { score: u32 },
    /// The pipe pair was recycled at the left edge
    ObstacleRespawned,
    /// Collision ended the session
    Died { score: u32, new_high: bool },
    /// Death drop finished, back on the start screen
    ReturnedToStart,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub mode: GameMode,
    pub player: PlayerState,
    pub obstacle: ObstaclePair,
    pub score: SessionScore,
    /// Frames ticked since construction
    pub frame: u64,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    generator: ObstacleGenerator,
}

impl GameState {
    /// Create a new game state on the start screen
    pub fn new(seed: u64, config: &GameConfig) -> Self {
        let mut generator = ObstacleGenerator::new(seed);
        let obstacle = generator.spawn(config.session_spawn_x(), config);
        Self {
            mode: GameMode::StartScreen,
            player: PlayerState::new(config),
            obstacle,
            score: SessionScore::new(),
            frame: 0,
            events: Vec::new(),
            generator,
        }
    }

    /// Replace the pipe pair with a fresh gap at `x`
    pub fn respawn_obstacle(&mut self, x: i32, config: &GameConfig) {
        self.obstacle = self.generator.spawn(x, config);
    }
}
