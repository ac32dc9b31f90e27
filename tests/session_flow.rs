//! Whole sessions driven through the public API on the headless platform

use flappy::autopilot::Autopilot;
use flappy::platform::{AudioCommand, Cue, HeadlessPlatform, Key, RawEvent, Sprite};
use flappy::sim::{GameEvent, GameMode};
use flappy::{Game, GameConfig, LoopControl};

fn start_click(config: &GameConfig) -> Vec<RawEvent> {
    vec![
        RawEvent::PointerMoved(config.start_button_center()),
        RawEvent::PointerPressed,
    ]
}

#[test]
fn autopilot_plays_sessions_and_quits() {
    let mut game = Game::new(GameConfig::default(), 2024).unwrap();
    let mut platform = HeadlessPlatform::new();
    let mut pilot = Autopilot::new(2);

    let mut quit = false;
    for _ in 0..50_000 {
        let events = pilot.next_events(game.state(), game.config());
        platform.push_frame(events);
        if game.step_frame(&mut platform) == LoopControl::Quit {
            quit = true;
            break;
        }
    }

    assert!(quit, "autopilot never finished its sessions");
    let summary = game.summary();
    assert_eq!(summary.sessions, 2);
    assert_eq!(summary.frames, platform.frames_presented());
    assert_eq!(game.state().mode, GameMode::StartScreen);
    assert!(summary.high_score >= summary.last_score);

    let deaths = platform
        .audio_log()
        .iter()
        .filter(|c| matches!(c, AudioCommand::Play { cue: Cue::Death, .. }))
        .count();
    assert_eq!(deaths, 2);
}

#[test]
fn same_seed_same_run() {
    let run = |seed: u64| {
        let mut game = Game::new(GameConfig::default(), seed).unwrap();
        let mut platform = HeadlessPlatform::new();
        let mut pilot = Autopilot::new(1);
        for _ in 0..50_000 {
            let events = pilot.next_events(game.state(), game.config());
            platform.push_frame(events);
            if game.step_frame(&mut platform) == LoopControl::Quit {
                break;
            }
        }
        (game.summary(), platform.audio_log().to_vec())
    };

    assert_eq!(run(99), run(99));
}

#[test]
fn ignored_input_on_start_screen_and_while_dying() {
    let config = GameConfig::default();
    let mut game = Game::new(config.clone(), 5).unwrap();
    let mut platform = HeadlessPlatform::new();

    // Flapping on the start screen does nothing
    platform.push_frame(vec![RawEvent::KeyDown(Key::Space)]);
    platform.push_frame(vec![RawEvent::KeyUp(Key::Space)]);
    game.step_frame(&mut platform);
    game.step_frame(&mut platform);
    assert_eq!(game.state().mode, GameMode::StartScreen);
    assert_eq!(game.state().player.y, config.player_start_y);
    assert!(platform.audio_log().is_empty());

    platform.push_frame(start_click(&config));
    game.step_frame(&mut platform);
    assert_eq!(game.state().events, vec![GameEvent::SessionStarted]);

    while game.state().mode == GameMode::Active {
        game.step_frame(&mut platform);
    }
    assert_eq!(game.state().mode, GameMode::Dying);

    // Neither flap nor a click can interrupt the death drop; the player
    // already lies on the floor so the drop ends this frame
    let cues_before = platform.audio_log().len();
    let mut events = start_click(&config);
    events.push(RawEvent::KeyDown(Key::Space));
    platform.push_frame(events);
    game.step_frame(&mut platform);
    assert_eq!(platform.audio_log().len(), cues_before);
    assert_eq!(game.state().mode, GameMode::StartScreen);
    assert_eq!(game.state().events, vec![GameEvent::ReturnedToStart]);
    assert!(!platform.drew(Sprite::PipeTop));
    assert!(platform.drew(Sprite::StartButton));
}
