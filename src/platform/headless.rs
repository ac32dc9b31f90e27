//! Headless platform
//!
//! Records draw and audio calls instead of displaying them, and replays queued
//! input events one batch per frame. Used by the native binary and tests.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{AudioPort, Color, Cue, FrameClock, InputPort, RawEvent, RenderPort, Sprite};

/// A recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Rect { pos: Vec2, size: Vec2, color: Color },
    Image { sprite: Sprite, pos: Vec2 },
    Line { from: Vec2, to: Vec2, width: f32, color: Color },
    Text { text: String, pos: Vec2 },
}

/// A recorded audio call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AudioCommand {
    Play { cue: Cue, volume: f32 },
    Stop { cue: Cue },
}

#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    /// Event batches, one popped per poll
    script: VecDeque<Vec<RawEvent>>,
    pending: Vec<DrawCommand>,
    /// Draw calls of the most recently presented frame
    last_frame: Vec<DrawCommand>,
    frames_presented: u64,
    audio: Vec<AudioCommand>,
    #[cfg(not(target_arch = "wasm32"))]
    clock: Option<super::clock::FixedRateClock>,
}

impl HeadlessPlatform {
    /// Unpaced: frames run as fast as the loop can go
    pub fn new() -> Self {
        Self::default()
    }

    /// Paced to real time like a windowed build
    #[cfg(not(target_arch = "wasm32"))]
    pub fn paced() -> Self {
        Self {
            clock: Some(super::clock::FixedRateClock::new()),
            ..Self::default()
        }
    }

    /// Queue the events for one future frame
    pub fn push_frame(&mut self, events: Vec<RawEvent>) {
        self.script.push_back(events);
    }

    /// Queue several frames of events
    pub fn script<I>(&mut self, frames: I)
    where
        I: IntoIterator<Item = Vec<RawEvent>>,
    {
        self.script.extend(frames);
    }

    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn audio_log(&self) -> &[AudioCommand] {
        &self.audio
    }

    /// Text drawn in the last presented frame
    pub fn texts(&self) -> Vec<&str> {
        self.last_frame
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Whether the last presented frame drew `sprite`
    pub fn drew(&self, sprite: Sprite) -> bool {
        self.last_frame
            .iter()
            .any(|c| matches!(c, DrawCommand::Image { sprite: s, .. } if *s == sprite))
    }
}

impl RenderPort for HeadlessPlatform {
    fn draw_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.pending.push(DrawCommand::Rect { pos, size, color });
    }

    fn draw_image(&mut self, sprite: Sprite, pos: Vec2) {
        self.pending.push(DrawCommand::Image { sprite, pos });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.pending.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2) {
        self.pending.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
        });
    }

    fn present_frame(&mut self) {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
    }
}

impl AudioPort for HeadlessPlatform {
    fn play_sound(&mut self, cue: Cue, volume: f32) {
        self.audio.push(AudioCommand::Play { cue, volume });
    }

    fn stop_sound(&mut self, cue: Cue) {
        self.audio.push(AudioCommand::Stop { cue });
    }
}

impl InputPort for HeadlessPlatform {
    fn poll_events(&mut self) -> Vec<RawEvent> {
        self.script.pop_front().unwrap_or_default()
    }
}

impl FrameClock for HeadlessPlatform {
    #[cfg(not(target_arch = "wasm32"))]
    fn wait_for_next_frame(&mut self, target_fps: u32) {
        if let Some(clock) = self.clock.as_mut() {
            clock.wait(target_fps);
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn wait_for_next_frame(&mut self, _target_fps: u32) {}
}
