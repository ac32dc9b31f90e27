//! Input/event adapter
//!
//! Turns raw platform events into semantic actions. The flap key is debounced:
//! holding it produces one `Flap` until it is released and pressed again.

use glam::Vec2;

use crate::config::GameConfig;
use crate::platform::{Key, RawEvent};
use crate::sim::TickInput;

/// Semantic actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Flap,
    ReleaseFlap,
    /// Start button clicked
    Activate,
    Quit,
}

/// Everything one frame's events amount to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameActions {
    pub tick: TickInput,
    pub quit: bool,
}

/// Stateful translator from raw events to actions
#[derive(Debug, Clone, Default)]
pub struct InputAdapter {
    flap_down: bool,
    pointer: Vec2,
}

impl InputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flap key currently held
    pub fn flap_held(&self) -> bool {
        self.flap_down
    }

    /// Last reported pointer position
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Map one raw event, updating key and pointer state
    pub fn map_event(&mut self, event: &RawEvent, config: &GameConfig) -> Option<Action> {
        match *event {
            RawEvent::Quit => Some(Action::Quit),
            RawEvent::KeyDown(Key::Space) => {
                if self.flap_down {
                    // Auto-repeat while held
                    None
                } else {
                    self.flap_down = true;
                    Some(Action::Flap)
                }
            }
            RawEvent::KeyUp(Key::Space) => {
                self.flap_down = false;
                Some(Action::ReleaseFlap)
            }
            RawEvent::KeyDown(Key::Other) | RawEvent::KeyUp(Key::Other) => None,
            RawEvent::PointerMoved(pos) => {
                self.pointer = pos;
                None
            }
            RawEvent::PointerPressed => {
                if cursor_on_start_button(self.pointer, config) {
                    Some(Action::Activate)
                } else {
                    None
                }
            }
        }
    }

    /// Fold a frame's worth of events into one input record
    pub fn collect(&mut self, events: &[RawEvent], config: &GameConfig) -> FrameActions {
        let mut actions = FrameActions::default();
        for event in events {
            match self.map_event(event, config) {
                Some(Action::Flap) => actions.tick.flap = true,
                Some(Action::Activate) => actions.tick.activate = true,
                Some(Action::Quit) => actions.quit = true,
                Some(Action::ReleaseFlap) | None => {}
            }
        }
        actions.tick.flap_held = self.flap_down;
        actions
    }
}

/// The cursor's bounding box must lie inside the start button, both as a
/// sprite rectangle and as the circle's bounding square
pub fn cursor_on_start_button(cursor: Vec2, config: &GameConfig) -> bool {
    let r = config.cursor_radius;
    let cursor_min = cursor - Vec2::splat(r);
    let cursor_max = cursor + Vec2::splat(r);

    let (button_min, button_size) = config.start_button_rect();
    let button_max = button_min + button_size;

    cursor_min.cmpge(button_min).all() && cursor_max.cmple(button_max).all()
}
