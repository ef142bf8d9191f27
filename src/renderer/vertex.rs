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

/// Colors for game elements
pub mod colors {
    /// Page behind the arena (letterbox bars)
    pub const LETTERBOX: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    /// #8B0000
    pub const BACKGROUND: [f32; 4] = [0.545, 0.0, 0.0, 1.0];
    pub const LIPS: [f32; 4] = [0.95, 0.35, 0.45, 1.0];
    pub const MOUTH_INSIDE: [f32; 4] = [0.25, 0.0, 0.05, 1.0];
    pub const TONGUE: [f32; 4] = [0.9, 0.45, 0.5, 1.0];
    pub const TOOTH: [f32; 4] = [0.98, 0.97, 0.9, 1.0];
    pub const TOOTH_SHADE: [f32; 4] = [0.8, 0.78, 0.7, 1.0];
    pub const PORTAL: [f32; 4] = [0.45, 0.2, 0.85, 1.0];
    pub const PORTAL_RING: [f32; 4] = [0.8, 0.6, 1.0, 1.0];
}
