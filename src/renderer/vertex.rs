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

/// Fixed scene colors
pub mod colors {
    pub const DX_BACKGROUND: [f32; 4] = [0.02, 0.02, 0.08, 1.0];
    pub const DX_BACKGROUND_TOP: [f32; 4] = [0.1, 0.05, 0.2, 1.0];
    pub const PADDLE: [f32; 4] = [0.3, 0.8, 1.0, 1.0];
    pub const PADDLE_SHOOTING: [f32; 4] = [1.0, 0.4, 0.2, 1.0];
    pub const BALL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const FIREBALL: [f32; 4] = [1.0, 0.5, 0.1, 1.0];
    pub const BULLET: [f32; 4] = [1.0, 1.0, 0.3, 1.0];
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.6];
    pub const BUTTON: [f32; 4] = [0.25, 0.25, 0.45, 1.0];
    pub const BUTTON_SELECTED: [f32; 4] = [0.45, 0.45, 0.8, 1.0];
    pub const SKY: [f32; 4] = [0.53, 0.81, 0.98, 1.0];
    pub const SUN: [f32; 4] = [1.0, 0.9, 0.3, 1.0];
    pub const CLOUD: [f32; 4] = [1.0, 1.0, 1.0, 0.9];
    pub const HILL: [f32; 4] = [0.3, 0.65, 0.3, 1.0];
    pub const GRASS: [f32; 4] = [0.2, 0.55, 0.2, 1.0];
    pub const HAY: [f32; 4] = [0.85, 0.7, 0.3, 1.0];
    pub const WALL: [f32; 4] = [0.85, 0.75, 0.6, 1.0];
    pub const ROOF: [f32; 4] = [0.7, 0.2, 0.15, 1.0];
    pub const WOOD: [f32; 4] = [0.45, 0.3, 0.15, 1.0];
    pub const CHICKEN: [f32; 4] = [1.0, 1.0, 0.95, 1.0];
    pub const BEAK: [f32; 4] = [1.0, 0.6, 0.1, 1.0];
    pub const BASKET: [f32; 4] = [0.6, 0.4, 0.2, 1.0];
    pub const FALLING_BG: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}
