//! WebGPU rendering module
//!
//! Flat-colored triangle lists built on the CPU each frame from the session.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState, arena_to_ndc};
pub use shapes::frame_vertices;
pub use vertex::Vertex;
