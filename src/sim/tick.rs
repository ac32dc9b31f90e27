//! Per-frame state machine
//!
//! Every mutation of player, obstacle and score state happens in here, inside the
//! update for the current mode or in one of the transition functions.

use super::collision;
use super::physics;
use super::state::{GameEvent, GameMode, GameState};
use crate::config::GameConfig;

/// Semantic input for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Flap key went down this frame (already debounced)
    pub flap: bool,
    /// Flap key is held after this frame's events
    pub flap_held: bool,
    /// Start button was clicked this frame
    pub activate: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, config: &GameConfig) {
    state.events.clear();
    state.frame += 1;

    match state.mode {
        GameMode::StartScreen => {
            state.player.flapping = input.flap_held;
            if input.activate {
                start_session(state, config);
            }
        }
        GameMode::Active => update_active(state, input, config),
        GameMode::Dying => update_dying(state, input, config),
    }
}

/// StartScreen -> Active
fn start_session(state: &mut GameState, config: &GameConfig) {
    state.player.reset(config);
    state.respawn_obstacle(config.session_spawn_x(), config);
    state.score.reset_current();
    state.mode = GameMode::Active;
    state.events.push(GameEvent::SessionStarted);
    log::info!("Session started (high score {})", state.score.high);
}

fn update_active(state: &mut GameState, input: &TickInput, config: &GameConfig) {
    state.player.flapping = input.flap_held;
    if input.flap {
        physics::flap(&mut state.player);
        state.events.push(GameEvent::Flapped);
    }

    physics::step(&mut state.player, config);
    advance_obstacle(state, config);

    let player = collision::player_hitbox(state.player.y, config);
    let obstacles = collision::obstacle_hitboxes(&state.obstacle, config);
    let ground = collision::ground_hitboxes(config);
    if collision::detect(&player, state.player.y, &obstacles, &ground, config) {
        enter_dying(state, config);
    }
}

/// Scroll the pipe pair, score it once as it crosses the score line, and recycle
/// it at the left sentinel
fn advance_obstacle(state: &mut GameState, config: &GameConfig) {
    if state.obstacle.x <= config.exit_sentinel {
        state.respawn_obstacle(config.respawn_x(), config);
        state.events.push(GameEvent::ObstacleRespawned);
        log::debug!(
            "Obstacle respawned: ground {:?}, ceiling {:?}",
            state.obstacle.ground_extensions,
            state.obstacle.ceiling_extensions
        );
        return;
    }

    let line = config.score_line();
    let before = state.obstacle.x as f32;
    state.obstacle.x -= config.scroll_speed;
    let after = state.obstacle.x as f32;

    if before > line && after <= line {
        state.score.increment();
        state.events.push(GameEvent::Scored {
            score: state.score.current,
        });
    }
}

/// Active -> Dying
fn enter_dying(state: &mut GameState, config: &GameConfig) {
    let new_high = state.score.fold_into_high();
    state.respawn_obstacle(config.respawn_x(), config);
    state.mode = GameMode::Dying;
    state.events.push(GameEvent::Died {
        score: state.score.current,
        new_high,
    });
    if new_high {
        log::info!("New high score: {}", state.score.high);
    }
    log::info!("Session ended with score {}", state.score.current);
}

/// Fixed-step death drop; back to the start screen once below the near-floor line.
/// Only the held-key sprite follows input here.
fn update_dying(state: &mut GameState, input: &TickInput, config: &GameConfig) {
    state.player.flapping = input.flap_held;
    if state.player.y <= config.near_floor_threshold {
        state.player.y += config.death_drop_step;
    }
    if state.player.y > config.near_floor_threshold {
        state.mode = GameMode::StartScreen;
        state.events.push(GameEvent::ReturnedToStart);
    }
}
