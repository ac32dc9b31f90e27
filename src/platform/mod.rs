//! Platform abstraction layer
//!
//! The game loop only talks to the outside world through these ports:
//! - Drawing shapes, sprites and text at pixel coordinates
//! - Playing and stopping sound cues
//! - Polling raw input events
//! - Waiting for the next frame boundary

#[cfg(not(target_arch = "wasm32"))]
pub mod clock;
pub mod headless;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use headless::{AudioCommand, DrawCommand, HeadlessPlatform};

/// RGB colour, 0-255 per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0);
    /// Sand band under the ground row
    pub const GROUND_BELOW: Color = Color(222, 216, 149);

    /// Linear 0-1 RGBA
    pub fn to_rgba(self) -> [f32; 4] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
            1.0,
        ]
    }
}

/// Images the scene draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sprite {
    Background,
    Ground,
    StartButton,
    PipeBase,
    PipeTop,
    /// Pipe cap hanging from the ceiling (vertically flipped)
    PipeTopFlipped,
    PlayerIdle,
    PlayerFlap,
}

/// Sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    Flap,
    Score,
    Death,
}

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Space,
    Other,
}

/// Raw events as the platform reports them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RawEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    /// Pointer moved to a playfield position
    PointerMoved(Vec2),
    /// Primary pointer button pressed at the last reported position
    PointerPressed,
}

/// Drawing surface
pub trait RenderPort {
    fn draw_rect(&mut self, pos: Vec2, size: Vec2, color: Color);
    fn draw_image(&mut self, sprite: Sprite, pos: Vec2);
    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
    fn draw_text(&mut self, text: &str, pos: Vec2);
    /// Flush everything drawn since the last present
    fn present_frame(&mut self);
}

/// Sound output
pub trait AudioPort {
    fn play_sound(&mut self, cue: Cue, volume: f32);
    fn stop_sound(&mut self, cue: Cue);
}

/// Input source
pub trait InputPort {
    /// Drain events received since the last poll
    fn poll_events(&mut self) -> Vec<RawEvent>;
}

/// Frame pacing
pub trait FrameClock {
    /// Block until the next frame boundary at `target_fps`
    fn wait_for_next_frame(&mut self, target_fps: u32);
}

/// Everything the game loop needs from its host
pub trait Platform: RenderPort + AudioPort + InputPort + FrameClock {}

impl<T: RenderPort + AudioPort + InputPort + FrameClock> Platform for T {}

/// Gate for callback-driven hosts such as `requestAnimationFrame`: at most one
/// frame per callback, once a full frame interval has passed since the last one.
/// Late callbacks never run extra frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameGate {
    last_step_ms: Option<f64>,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a frame is due at `now_ms`; records the step when it is
    pub fn should_step(&mut self, now_ms: f64, frame_ms: f64) -> bool {
        match self.last_step_ms {
            Some(last) if now_ms - last < frame_ms => false,
            _ => {
                self.last_step_ms = Some(now_ms);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    #[test]
    fn test_first_callback_steps() {
        let mut gate = FrameGate::new();
        assert!(gate.should_step(5.0, FRAME_MS));
    }

    #[test]
    fn test_fast_callbacks_wait_for_full_interval() {
        let mut gate = FrameGate::new();
        assert!(gate.should_step(0.0, FRAME_MS));
        // 120 Hz display: every other callback
        assert!(!gate.should_step(8.3, FRAME_MS));
        assert!(gate.should_step(16.7, FRAME_MS));
        assert!(!gate.should_step(25.0, FRAME_MS));
        assert!(gate.should_step(33.4, FRAME_MS));
    }

    #[test]
    fn test_stall_runs_one_frame_without_backlog() {
        let mut gate = FrameGate::new();
        assert!(gate.should_step(0.0, FRAME_MS));
        // A 100 ms stall is one step, and the next callback is timed from it
        assert!(gate.should_step(100.0, FRAME_MS));
        assert!(!gate.should_step(101.0, FRAME_MS));
        assert!(gate.should_step(100.0 + FRAME_MS, FRAME_MS));
    }
}
