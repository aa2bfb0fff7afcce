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

/// Colors for sandbox elements (sRGB, 0-1)
pub mod colors {
    const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    pub const BACKGROUND: [f32; 4] = rgb(250, 250, 250);
    pub const PLAYFIELD: [f32; 4] = rgb(255, 255, 255);
    pub const INVENTORY_STRIP: [f32; 4] = rgb(240, 244, 248);
    pub const INVENTORY_SLOT: [f32; 4] = rgb(226, 232, 240);
    pub const DELETE_ZONE: [f32; 4] = rgb(255, 210, 210);
    pub const DELETE_ZONE_BORDER: [f32; 4] = rgb(206, 106, 106);
    pub const CURSOR_RING: [f32; 4] = rgb(180, 190, 220);
    pub const CURSOR_RING_ACTIVE: [f32; 4] = rgb(110, 130, 200);
}

/// Convert an sRGB-encoded channel to linear light
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_size() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(Vertex::desc().array_stride, 24);
    }

    #[test]
    fn test_srgb_to_linear_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        assert!(srgb_to_linear(0.5) < 0.5);
    }
}
