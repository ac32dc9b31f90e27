//! Vertex-building render port
//!
//! Tessellates draw calls into playfield-space triangles. `present_frame`
//! seals the frame; the presenter picks it up with [`QuadCanvas::take_frame`].

use glam::Vec2;

use super::font;
use super::shapes;
use super::vertex::{Vertex, colors};
use crate::config::GameConfig;
use crate::platform::{Color, RenderPort, Sprite};

pub struct QuadCanvas {
    config: GameConfig,
    pending: Vec<Vertex>,
    ready: Option<Vec<Vertex>>,
}

impl QuadCanvas {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            pending: Vec::new(),
            ready: None,
        }
    }

    /// Vertices of the last presented frame, if it has not been taken yet
    pub fn take_frame(&mut self) -> Option<Vec<Vertex>> {
        self.ready.take()
    }
}

impl RenderPort for QuadCanvas {
    fn draw_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.pending.extend(shapes::rect(pos, size, color.to_rgba()));
    }

    fn draw_image(&mut self, sprite: Sprite, pos: Vec2) {
        self.pending.extend(shapes::sprite(sprite, pos, &self.config));
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.pending.extend(shapes::line(from, to, width, color.to_rgba()));
    }

    fn draw_text(&mut self, text: &str, pos: Vec2) {
        for (cell_pos, cell) in font::layout(text, pos, self.config.font_size) {
            self.pending
                .extend(shapes::rect(cell_pos, Vec2::splat(cell), colors::TEXT));
        }
    }

    fn present_frame(&mut self) {
        // An untaken frame is dropped in favour of the newer one
        self.ready = Some(std::mem::take(&mut self.pending));
    }
}
