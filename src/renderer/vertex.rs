//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Palette for the procedural sprites
pub mod colors {
    pub const SKY: [f32; 4] = [0.44, 0.77, 0.81, 1.0];
    pub const CLOUD: [f32; 4] = [0.92, 0.96, 0.96, 1.0];
    pub const GRASS: [f32; 4] = [0.45, 0.75, 0.18, 1.0];
    pub const GRASS_DARK: [f32; 4] = [0.33, 0.58, 0.12, 1.0];
    pub const DIRT: [f32; 4] = [0.87, 0.85, 0.58, 1.0];
    pub const PIPE: [f32; 4] = [0.45, 0.75, 0.18, 1.0];
    pub const PIPE_LIGHT: [f32; 4] = [0.62, 0.88, 0.33, 1.0];
    pub const PIPE_DARK: [f32; 4] = [0.22, 0.42, 0.09, 1.0];
    pub const BIRD_BODY: [f32; 4] = [0.98, 0.78, 0.16, 1.0];
    pub const BIRD_WING: [f32; 4] = [0.96, 0.93, 0.78, 1.0];
    pub const BIRD_BEAK: [f32; 4] = [0.95, 0.42, 0.13, 1.0];
    pub const EYE_WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const EYE_PUPIL: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const BUTTON: [f32; 4] = [0.91, 0.36, 0.18, 1.0];
    pub const BUTTON_ICON: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const CLEAR: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
}
