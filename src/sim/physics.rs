//! Fixed-step vertical physics for the player
//!
//! One call to [`step`] is one frame. Nothing is scaled by wall-clock time.

use super::state::PlayerState;
use crate::config::GameConfig;

/// Advance the player one frame: move by the current velocity, then accelerate
pub fn step(player: &mut PlayerState, config: &GameConfig) {
    player.y += player.velocity;
    player.velocity += config.gravity;
    player.y = player.y.clamp(config.ceiling_limit, config.floor_limit());
}

/// Replace the current velocity with a full upward impulse
pub fn flap(player: &mut PlayerState) {
    player.velocity = -player.flap_speed;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn player_at(y: f32, velocity: f32) -> PlayerState {
        let config = GameConfig::default();
        PlayerState {
            y,
            velocity,
            ..PlayerState::new(&config)
        }
    }

    #[test]
    fn test_step_uses_pre_update_velocity() {
        let config = GameConfig::default();
        let mut player = player_at(300.0, 4.0);
        step(&mut player, &config);
        assert_eq!(player.y, 304.0);
        assert_eq!(player.velocity, 5.0);
    }

    #[test]
    fn test_flap_resets_rather_than_adds() {
        let mut player = player_at(300.0, 8.0);
        flap(&mut player);
        assert_eq!(player.velocity, -10.0);

        player.velocity = -3.0;
        flap(&mut player);
        assert_eq!(player.velocity, -10.0);
    }

    #[test]
    fn test_clamped_to_ceiling() {
        let config = GameConfig::default();
        let mut player = player_at(-25.0, -10.0);
        step(&mut player, &config);
        assert_eq!(player.y, config.ceiling_limit);
    }

    #[test]
    fn test_clamped_to_floor() {
        let config = GameConfig::default();
        let mut player = player_at(560.0, 20.0);
        step(&mut player, &config);
        assert_eq!(player.y, 568.0);
        // Velocity keeps integrating while resting on the floor
        assert_eq!(player.velocity, 21.0);
    }

    proptest! {
        #[test]
        fn prop_step_matches_integration(y in -32i32..=568, v in -10i32..40) {
            let config = GameConfig::default();
            let mut player = player_at(y as f32, v as f32);
            step(&mut player, &config);

            let expected = (y as f32 + v as f32).clamp(config.ceiling_limit, config.floor_limit());
            prop_assert_eq!(player.y, expected);
            prop_assert_eq!(player.velocity, v as f32 + config.gravity);
        }
    }
}
