//! Scene composition
//!
//! Issues the draw calls for one frame through any [`RenderPort`]. Does not
//! present; the game loop does that once the frame is complete.

use glam::Vec2;

use crate::config::GameConfig;
use crate::platform::{Color, RenderPort, Sprite};
use crate::sim::{GameMode, GameState};

/// Draw the whole frame for the current state
pub fn draw_frame<R: RenderPort + ?Sized>(out: &mut R, state: &GameState, config: &GameConfig) {
    draw_backdrop(out, config);
    draw_player(out, state, config);
    if state.mode == GameMode::Active {
        draw_obstacle(out, state, config);
    }

    out.draw_text(&state.score.current.to_string(), config.score_text_pos);

    if state.mode == GameMode::StartScreen {
        let (pos, _) = config.start_button_rect();
        out.draw_image(Sprite::StartButton, pos);
        out.draw_text(
            &format!("Highscore: {}", state.score.high),
            config.high_score_text_pos,
        );
    }
}

/// Sky, ground tile row, sand band and the ground edge line
fn draw_backdrop<R: RenderPort + ?Sized>(out: &mut R, config: &GameConfig) {
    out.draw_image(Sprite::Background, Vec2::ZERO);

    let tile = config.tile_size;
    let ground_y = config.ground_row_y();
    let fill_y = config.ground_fill_y();
    let columns = (config.playfield_width / tile).ceil() as usize;
    for i in 0..columns {
        let x = i as f32 * tile;
        out.draw_image(Sprite::Ground, Vec2::new(x, ground_y));
        out.draw_rect(Vec2::new(x, fill_y), Vec2::splat(tile), Color::GROUND_BELOW);
    }

    out.draw_line(
        Vec2::new(0.0, ground_y),
        Vec2::new(config.playfield_width, ground_y),
        1.0,
        Color::BLACK,
    );
}

fn draw_player<R: RenderPort + ?Sized>(out: &mut R, state: &GameState, config: &GameConfig) {
    let sprite = if state.player.flapping {
        Sprite::PlayerFlap
    } else {
        Sprite::PlayerIdle
    };
    out.draw_image(sprite, Vec2::new(config.player_draw_x, state.player.y));
}

fn draw_obstacle<R: RenderPort + ?Sized>(out: &mut R, state: &GameState, config: &GameConfig) {
    let obstacle = &state.obstacle;
    let tile = config.tile_size as i32;
    let x = obstacle.x as f32;
    let at = |y: i32| Vec2::new(x, y as f32);

    out.draw_image(Sprite::PipeBase, at(config.ground_base_y));
    for &y in &obstacle.ground_extensions {
        out.draw_image(Sprite::PipeBase, at(y));
    }
    out.draw_image(Sprite::PipeTop, at(obstacle.ground_cap_y(tile)));

    out.draw_image(Sprite::PipeBase, at(config.ceiling_base_y));
    for &y in &obstacle.ceiling_extensions {
        out.draw_image(Sprite::PipeBase, at(y));
    }
    out.draw_image(Sprite::PipeTopFlipped, at(obstacle.ceiling_cap_y(tile)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{DrawCommand, HeadlessPlatform};
    use crate::sim::{TickInput, tick};

    fn render(state: &GameState, config: &GameConfig) -> HeadlessPlatform {
        let mut platform = HeadlessPlatform::new();
        draw_frame(&mut platform, state, config);
        platform.present_frame();
        platform
    }

    #[test]
    fn test_start_screen_shows_button_and_high_score() {
        let config = GameConfig::default();
        let mut state = GameState::new(1, &config);
        state.score.high = 12;
        let platform = render(&state, &config);

        assert!(platform.drew(Sprite::StartButton));
        assert!(platform.drew(Sprite::PlayerIdle));
        assert!(!platform.drew(Sprite::PipeTop));
        assert_eq!(platform.texts(), vec!["0", "Highscore: 12"]);
    }

    #[test]
    fn test_active_frame_draws_pipes() {
        let config = GameConfig::default();
        let mut state = GameState::new(1, &config);
        tick(
            &mut state,
            &TickInput {
                activate: true,
                ..Default::default()
            },
            &config,
        );
        state.obstacle.x = 300;
        let platform = render(&state, &config);

        assert!(!platform.drew(Sprite::StartButton));
        let pipes = platform
            .last_frame()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Image { sprite: Sprite::PipeBase, .. }))
            .count();
        let expected =
            2 + state.obstacle.ground_extensions.len() + state.obstacle.ceiling_extensions.len();
        assert_eq!(pipes, expected);
        assert!(platform.drew(Sprite::PipeTop));
        assert!(platform.drew(Sprite::PipeTopFlipped));
        assert_eq!(platform.texts(), vec!["0"]);
    }

    #[test]
    fn test_flap_sprite_while_key_held() {
        let config = GameConfig::default();
        let mut state = GameState::new(1, &config);
        state.player.flapping = true;
        let platform = render(&state, &config);
        assert!(platform.drew(Sprite::PlayerFlap));
        assert!(!platform.drew(Sprite::PlayerIdle));
    }

    #[test]
    fn test_ground_row_tiles_playfield() {
        let config = GameConfig::default();
        let state = GameState::new(1, &config);
        let platform = render(&state, &config);
        let ground = platform
            .last_frame()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Image { sprite: Sprite::Ground, pos } if pos.y == 640.0))
            .count();
        assert_eq!(ground, 9);
    }
}
