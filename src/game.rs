//! Frame loop driver
//!
//! One frame is: poll input, tick the simulation, fire sound cues for what
//! happened, draw, present. `run` adds the wait for the next frame boundary.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, GameConfig};
use crate::input::InputAdapter;
use crate::platform::{Cue, Platform};
use crate::renderer::draw_frame;
use crate::sim::{GameEvent, GameState, tick};

/// Whether the loop should keep going after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// What a finished run amounted to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub frames: u64,
    pub sessions: u32,
    pub high_score: u32,
    pub last_score: u32,
}

/// Game instance holding config, state and input tracking
pub struct Game {
    config: GameConfig,
    state: GameState,
    input: InputAdapter,
    seed: u64,
    sessions: u32,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new(seed, &config);
        log::info!("Game initialized with seed: {}", seed);
        Ok(Self {
            config,
            state,
            input: InputAdapter::new(),
            seed,
            sessions: 0,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            seed: self.seed,
            frames: self.state.frame,
            sessions: self.sessions,
            high_score: self.state.score.high.max(self.state.score.current),
            last_score: self.state.score.current,
        }
    }

    /// Run one frame against the platform. A quit request still lets the
    /// frame finish (tick, cues, draw, present) before reporting `Quit`.
    pub fn step_frame<P: Platform + ?Sized>(&mut self, platform: &mut P) -> LoopControl {
        let events = platform.poll_events();
        let actions = self.input.collect(&events, &self.config);

        tick(&mut self.state, &actions.tick, &self.config);
        self.play_cues(platform);

        draw_frame(platform, &self.state, &self.config);
        platform.present_frame();

        if actions.quit {
            log::info!("Quit requested after frame {}", self.state.frame);
            LoopControl::Quit
        } else {
            LoopControl::Continue
        }
    }

    /// Step frames at the configured rate until quit; returns frames run
    pub fn run<P: Platform + ?Sized>(&mut self, platform: &mut P) -> u64 {
        let start = self.state.frame;
        while self.step_frame(platform) == LoopControl::Continue {
            platform.wait_for_next_frame(self.config.target_fps);
        }
        self.state.frame - start
    }

    fn play_cues<P: Platform + ?Sized>(&mut self, platform: &mut P) {
        let volumes = self.config.volumes;
        for event in &self.state.events {
            match *event {
                GameEvent::SessionStarted => self.sessions += 1,
                GameEvent::Flapped => platform.play_sound(Cue::Flap, volumes.flap),
                GameEvent::Scored { .. } => {
                    platform.stop_sound(Cue::Flap);
                    platform.stop_sound(Cue::Death);
                    platform.play_sound(Cue::Score, volumes.score);
                }
                GameEvent::Died { .. } => {
                    platform.stop_sound(Cue::Flap);
                    platform.play_sound(Cue::Death, volumes.death);
                }
                GameEvent::ObstacleRespawned | GameEvent::ReturnedToStart => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{AudioCommand, HeadlessPlatform, Key, RawEvent, Sprite};
    use crate::sim::GameMode;

    fn click_start(config: &GameConfig) -> Vec<RawEvent> {
        vec![
            RawEvent::PointerMoved(config.start_button_center()),
            RawEvent::PointerPressed,
        ]
    }

    fn new_game() -> Game {
        Game::new(GameConfig::default(), 7).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig {
            target_fps: 0,
            ..GameConfig::default()
        };
        assert!(Game::new(config, 1).is_err());
    }

    #[test]
    fn test_idle_frame_draws_start_screen() {
        let mut game = new_game();
        let mut platform = HeadlessPlatform::new();
        assert_eq!(game.step_frame(&mut platform), LoopControl::Continue);
        assert_eq!(platform.frames_presented(), 1);
        assert!(platform.drew(Sprite::StartButton));
        assert!(platform.audio_log().is_empty());
    }

    #[test]
    fn test_click_starts_session_and_flap_plays_cue() {
        let mut game = new_game();
        let config = game.config().clone();
        let mut platform = HeadlessPlatform::new();
        platform.push_frame(click_start(&config));
        platform.push_frame(vec![RawEvent::KeyDown(Key::Space)]);

        game.step_frame(&mut platform);
        assert_eq!(game.state().mode, GameMode::Active);
        assert!(!platform.drew(Sprite::StartButton));

        game.step_frame(&mut platform);
        assert_eq!(
            platform.audio_log(),
            &[AudioCommand::Play {
                cue: Cue::Flap,
                volume: 0.2
            }]
        );
        assert!(platform.drew(Sprite::PlayerFlap));
        assert_eq!(game.summary().sessions, 1);
    }

    #[test]
    fn test_quit_finishes_frame_first() {
        let mut game = new_game();
        let mut platform = HeadlessPlatform::new();
        platform.push_frame(vec![RawEvent::Quit]);
        assert_eq!(game.step_frame(&mut platform), LoopControl::Quit);
        assert_eq!(platform.frames_presented(), 1);
        assert_eq!(game.state().frame, 1);
    }

    #[test]
    fn test_run_stops_on_quit() {
        let mut game = new_game();
        let mut platform = HeadlessPlatform::new();
        platform.script([vec![], vec![], vec![RawEvent::Quit]]);
        assert_eq!(game.run(&mut platform), 3);
        assert_eq!(platform.frames_presented(), 3);
    }

    #[test]
    fn test_death_cuts_flap_and_plays_death_cue() {
        let mut game = new_game();
        let config = game.config().clone();
        let mut platform = HeadlessPlatform::new();
        platform.push_frame(click_start(&config));

        // Free fall into the ground
        for _ in 0..200 {
            game.step_frame(&mut platform);
            if game.state().mode == GameMode::Dying {
                break;
            }
        }
        assert_eq!(game.state().mode, GameMode::Dying);
        assert_eq!(
            platform.audio_log(),
            &[
                AudioCommand::Stop { cue: Cue::Flap },
                AudioCommand::Play {
                    cue: Cue::Death,
                    volume: 0.3
                },
            ]
        );

        for _ in 0..200 {
            game.step_frame(&mut platform);
            if game.state().mode == GameMode::StartScreen {
                break;
            }
        }
        assert_eq!(game.state().mode, GameMode::StartScreen);
        assert!(platform.drew(Sprite::StartButton));
    }
}
