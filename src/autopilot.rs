//! Demo autopilot
//!
//! Plays the game through raw events, the same way a person at the keyboard
//! would: click the start button, tap space to stay level with the next gap,
//! and quit once enough sessions have been played. Once a session reaches the
//! score target the pilot lets go, so every session ends.

use glam::Vec2;

use crate::config::GameConfig;
use crate::platform::{Key, RawEvent};
use crate::sim::{GameMode, GameState};

/// Below the gap centre by this much before flapping
const FLAP_MARGIN: f32 = 12.0;
const DEFAULT_SCORE_TARGET: u32 = 10;

#[derive(Debug, Clone)]
pub struct Autopilot {
    sessions_wanted: u32,
    sessions_started: u32,
    score_target: u32,
    space_down: bool,
}

impl Autopilot {
    /// Play `sessions` sessions, then quit from the start screen
    pub fn new(sessions: u32) -> Self {
        Self {
            sessions_wanted: sessions,
            sessions_started: 0,
            score_target: DEFAULT_SCORE_TARGET,
            space_down: false,
        }
    }

    /// Stop flapping once a session scores this many
    pub fn with_score_target(mut self, target: u32) -> Self {
        self.score_target = target;
        self
    }

    pub fn sessions_started(&self) -> u32 {
        self.sessions_started
    }

    /// Events for the next frame given the state the last frame left behind
    pub fn next_events(&mut self, state: &GameState, config: &GameConfig) -> Vec<RawEvent> {
        let mut events = Vec::new();

        // Taps are one frame long so every flap is a fresh key press
        if self.space_down {
            events.push(RawEvent::KeyUp(Key::Space));
            self.space_down = false;
            return events;
        }

        match state.mode {
            GameMode::StartScreen => {
                if self.sessions_started >= self.sessions_wanted {
                    events.push(RawEvent::Quit);
                } else {
                    events.push(RawEvent::PointerMoved(config.start_button_center()));
                    events.push(RawEvent::PointerPressed);
                    self.sessions_started += 1;
                }
            }
            GameMode::Active => {
                if self.should_flap(state, config) {
                    events.push(RawEvent::KeyDown(Key::Space));
                    self.space_down = true;
                }
            }
            GameMode::Dying => {}
        }
        events
    }

    fn should_flap(&self, state: &GameState, config: &GameConfig) -> bool {
        let center: Vec2 = config.player_center(state.player.y);
        let target = state.obstacle.gap_center(config.tile_size as i32);
        state.score.current < self.score_target
            && state.player.velocity >= 0.0
            && center.y > target + FLAP_MARGIN
    }
}
