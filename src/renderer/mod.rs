//! Rendering
//!
//! `scene` issues draw calls through any render port. `canvas` turns those
//! calls into flat-coloured triangles that `pipeline` uploads to WebGPU.

pub mod canvas;
pub mod font;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use canvas::QuadCanvas;
pub use pipeline::{RenderInitError, RenderState};
pub use scene::draw_frame;
pub use vertex::Vertex;
