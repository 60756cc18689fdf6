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
    const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    pub const BACKGROUND: [f32; 4] = rgb(20, 20, 40);
    pub const PLAYER: [f32; 4] = rgb(100, 255, 100);
    pub const PLAYER_SHIELDED: [f32; 4] = rgb(255, 200, 255);
    pub const PLAYER_HIT: [f32; 4] = rgb(255, 100, 100);
    pub const GROUND: [f32; 4] = rgb(100, 100, 100);
    pub const PLATFORM: [f32; 4] = rgb(80, 150, 200);
    pub const COIN: [f32; 4] = rgb(255, 220, 0);
    pub const COIN_OUTLINE: [f32; 4] = rgb(200, 180, 0);
    pub const POWER_UP_DOUBLE_JUMP: [f32; 4] = rgb(100, 200, 255);
    pub const POWER_UP_SHIELD: [f32; 4] = rgb(255, 100, 200);
    pub const POWER_UP_OUTLINE: [f32; 4] = rgb(0, 0, 0);
    pub const OBSTACLE: [f32; 4] = rgb(255, 50, 50);
}
