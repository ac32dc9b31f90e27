//! Shape generation for 2D primitives and procedural sprites
//!
//! All coordinates are playfield pixels, y pointing down.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::config::GameConfig;
use crate::platform::Sprite;

/// Two triangles covering an axis-aligned rectangle
pub fn rect(pos: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Quad of the given width centred on the segment
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a = from + perp;
    let b = from - perp;
    let c = to + perp;
    let d = to - perp;
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Paint a sprite with its top-left corner at `pos`
pub fn sprite(sprite: Sprite, pos: Vec2, config: &GameConfig) -> Vec<Vertex> {
    let tile = config.tile_size;
    match sprite {
        Sprite::Background => background(pos, config),
        Sprite::Ground => ground_tile(pos, tile),
        Sprite::PipeBase => pipe_segment(pos, tile),
        Sprite::PipeTop => pipe_cap(pos, tile, false),
        Sprite::PipeTopFlipped => pipe_cap(pos, tile, true),
        Sprite::PlayerIdle => bird(pos, config.player_size, false),
        Sprite::PlayerFlap => bird(pos, config.player_size, true),
        Sprite::StartButton => start_button(pos, config.start_button_radius),
    }
}

/// Sky down to the ground row, with a couple of clouds
fn background(pos: Vec2, config: &GameConfig) -> Vec<Vertex> {
    let size = Vec2::new(config.playfield_width, config.ground_row_y());
    let mut v = rect(pos, size, colors::SKY);
    for (cx, cy, r) in [(90.0, 120.0, 28.0), (130.0, 110.0, 36.0), (420.0, 200.0, 30.0)] {
        v.extend(circle(pos + Vec2::new(cx, cy), r, colors::CLOUD, 20));
    }
    v
}

fn ground_tile(pos: Vec2, tile: f32) -> Vec<Vertex> {
    let mut v = rect(pos, Vec2::splat(tile), colors::DIRT);
    v.extend(rect(pos, Vec2::new(tile, tile * 0.25), colors::GRASS));
    // Diagonal stripe
    let y = pos.y + tile * 0.125;
    v.extend(line(
        Vec2::new(pos.x, y + tile * 0.1),
        Vec2::new(pos.x + tile * 0.5, y - tile * 0.1),
        tile * 0.08,
        colors::GRASS_DARK,
    ));
    v
}

fn pipe_segment(pos: Vec2, tile: f32) -> Vec<Vertex> {
    let inset = tile * 0.08;
    let mut v = rect(pos + Vec2::new(inset, 0.0), Vec2::new(tile - 2.0 * inset, tile), colors::PIPE);
    v.extend(rect(
        pos + Vec2::new(inset * 2.0, 0.0),
        Vec2::new(tile * 0.12, tile),
        colors::PIPE_LIGHT,
    ));
    v.extend(rect(pos + Vec2::new(inset, 0.0), Vec2::new(3.0, tile), colors::PIPE_DARK));
    v.extend(rect(
        pos + Vec2::new(tile - inset - 3.0, 0.0),
        Vec2::new(3.0, tile),
        colors::PIPE_DARK,
    ));
    v
}

/// Pipe mouth; the rim faces up, or down when flipped
fn pipe_cap(pos: Vec2, tile: f32, flipped: bool) -> Vec<Vertex> {
    let mut v = pipe_segment(pos, tile);
    let rim_height = tile * 0.4;
    let rim_y = if flipped { pos.y + tile - rim_height } else { pos.y };
    let rim = Vec2::new(pos.x, rim_y);
    v.extend(rect(rim, Vec2::new(tile, rim_height), colors::PIPE));
    v.extend(rect(rim + Vec2::new(4.0, 0.0), Vec2::new(tile * 0.12, rim_height), colors::PIPE_LIGHT));
    let edge_y = if flipped { rim_y + rim_height - 3.0 } else { rim_y };
    v.extend(rect(Vec2::new(pos.x, edge_y), Vec2::new(tile, 3.0), colors::PIPE_DARK));
    v
}

/// Round bird centred in its sprite box; the wing is raised while flapping
fn bird(pos: Vec2, size: Vec2, flapping: bool) -> Vec<Vertex> {
    let center = pos + size / 2.0;
    let r = size.y * 0.25;
    let mut v = circle(center, r, colors::BIRD_BODY, 24);

    let wing_y = if flapping { -r * 0.45 } else { r * 0.3 };
    v.extend(circle(center + Vec2::new(-r * 0.45, wing_y), r * 0.42, colors::BIRD_WING, 16));

    v.extend(circle(center + Vec2::new(r * 0.45, -r * 0.35), r * 0.32, colors::EYE_WHITE, 16));
    v.extend(circle(center + Vec2::new(r * 0.55, -r * 0.35), r * 0.13, colors::EYE_PUPIL, 12));

    let beak = center + Vec2::new(r * 0.8, r * 0.15);
    v.extend(triangle(
        beak + Vec2::new(0.0, -r * 0.2),
        beak + Vec2::new(r * 0.55, 0.0),
        beak + Vec2::new(0.0, r * 0.2),
        colors::BIRD_BEAK,
    ));
    v
}

/// Round button with a play arrow
fn start_button(pos: Vec2, radius: f32) -> Vec<Vertex> {
    let center = pos + Vec2::splat(radius);
    let mut v = circle(center, radius, colors::BUTTON, 32);
    let s = radius * 0.45;
    v.extend(triangle(
        center + Vec2::new(-s * 0.6, -s),
        center + Vec2::new(s, 0.0),
        center + Vec2::new(-s * 0.6, s),
        colors::BUTTON_ICON,
    ));
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_covers_corners() {
        let v = rect(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), colors::TEXT);
        assert_eq!(v.len(), 6);
        assert!(v.iter().any(|p| p.position == [1.0, 2.0]));
        assert!(v.iter().any(|p| p.position == [4.0, 6.0]));
    }

    #[test]
    fn test_line_has_width() {
        let v = line(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 4.0, colors::TEXT);
        assert_eq!(v.len(), 6);
        let ys: Vec<f32> = v.iter().map(|p| p.position[1]).collect();
        assert!(ys.iter().all(|y| (y.abs() - 2.0).abs() < 1e-5));
    }

    #[test]
    fn test_degenerate_line_is_empty() {
        let p = Vec2::new(5.0, 5.0);
        assert!(line(p, p, 2.0, colors::TEXT).is_empty());
    }

    #[test]
    fn test_every_sprite_paints_something() {
        let config = GameConfig::default();
        for s in [
            Sprite::Background,
            Sprite::Ground,
            Sprite::StartButton,
            Sprite::PipeBase,
            Sprite::PipeTop,
            Sprite::PipeTopFlipped,
            Sprite::PlayerIdle,
            Sprite::PlayerFlap,
        ] {
            let v = sprite(s, Vec2::ZERO, &config);
            assert!(!v.is_empty(), "{s:?} painted nothing");
            assert_eq!(v.len() % 3, 0);
        }
    }

    #[test]
    fn test_bird_stays_inside_sprite_box() {
        let config = GameConfig::default();
        let pos = Vec2::new(0.0, 100.0);
        for v in sprite(Sprite::PlayerFlap, pos, &config) {
            assert!(v.position[0] >= 0.0 && v.position[0] <= 128.0);
            assert!(v.position[1] >= 100.0 && v.position[1] <= 228.0);
        }
    }
}
