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

/// Brand palette, in the same (non-linear) space a 2D canvas uses
pub mod colors {
    const fn rgba(r: u8, g: u8, b: u8, a: f32) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a]
    }

    pub const SENAC_BLUE: [f32; 4] = rgba(0x00, 0x45, 0x87, 1.0);
    pub const SENAC_BLUE_LIGHT: [f32; 4] = rgba(0x00, 0x5B, 0xB3, 1.0);
    pub const SENAC_ORANGE: [f32; 4] = rgba(0xF6, 0x8D, 0x2E, 1.0);
    pub const SKY_TOP: [f32; 4] = rgba(0xE0, 0xF7, 0xFA, 1.0);
    pub const SKY_BOTTOM: [f32; 4] = rgba(0xFF, 0xFF, 0xFF, 1.0);
    pub const GRID: [f32; 4] = rgba(0x00, 0x45, 0x87, 0.05);
    pub const OBSTACLE_STRIPE: [f32; 4] = rgba(0xFF, 0xFF, 0xFF, 0.2);
    pub const GROUND: [f32; 4] = rgba(0x33, 0x33, 0x33, 1.0);
    pub const WHITE: [f32; 4] = rgba(0xFF, 0xFF, 0xFF, 1.0);
    pub const BLACK: [f32; 4] = rgba(0x00, 0x00, 0x00, 1.0);

    /// Same color, scaled opacity
    pub fn faded(color: [f32; 4], alpha: f32) -> [f32; 4] {
        [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
    }
}
