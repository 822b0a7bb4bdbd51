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
    /// 0xRRGGBB to opaque RGBA floats
    pub const fn rgb(hex: u32) -> [f32; 4] {
        [
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
            1.0,
        ]
    }

    /// Same color with a different alpha
    pub const fn with_alpha(c: [f32; 4], a: f32) -> [f32; 4] {
        [c[0], c[1], c[2], a]
    }

    /// Scale the RGB channels toward black
    pub fn darken(c: [f32; 4], factor: f32) -> [f32; 4] {
        [c[0] * factor, c[1] * factor, c[2] * factor, c[3]]
    }

    pub const BACKGROUND: [f32; 4] = rgb(0xfafafa);
    pub const WATER_TOP: [f32; 4] = rgb(0x0284c7);
    pub const WATER_BOTTOM: [f32; 4] = rgb(0x082f49);
    pub const SEAWEED: [f32; 4] = rgb(0x15803d);
    pub const DUST: [f32; 4] = with_alpha(rgb(0xa1a1aa), 0.4);
    pub const BUBBLE_RIM: [f32; 4] = [1.0, 1.0, 1.0, 0.4];
    pub const BUBBLE_GLINT: [f32; 4] = [1.0, 1.0, 1.0, 0.6];
    pub const RIPPLE: [f32; 4] = rgb(0x6366f1);
    pub const RIPPLE_UNDERWATER: [f32; 4] = [1.0, 1.0, 1.0, 0.5];
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const TRANSPARENT_WHITE: [f32; 4] = [1.0, 1.0, 1.0, 0.0];

    pub const MOUSE_EAR: [f32; 4] = rgb(0xfda4af);
    pub const WHISKER: [f32; 4] = rgb(0x4b5563);
    pub const FLY_BODY: [f32; 4] = rgb(0x1f2937);
    pub const FLY_WING: [f32; 4] = [200.0 / 255.0, 220.0 / 255.0, 1.0, 0.7];
    pub const FLY_EYE: [f32; 4] = rgb(0xb91c1c);
    pub const BUTTERFLY_BODY: [f32; 4] = rgb(0x222222);
    pub const BUTTERFLY_SPOT: [f32; 4] = rgb(0xfed7aa);
    pub const BEETLE_SEAM: [f32; 4] = [0.0, 0.0, 0.0, 0.3];
    pub const BEETLE_HEAD: [f32; 4] = rgb(0x111111);
    pub const FISH_FIN: [f32; 4] = [1.0, 1.0, 1.0, 0.4];
    pub const SNAKE_TONGUE: [f32; 4] = rgb(0xef4444);
}

#[cfg(test)]
mod tests {
    use super::colors::*;

    #[test]
    fn test_rgb_channels() {
        assert_eq!(rgb(0xff0000), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rgb(0x00ff00)[1], 1.0);
        assert_eq!(with_alpha(WHITE, 0.25)[3], 0.25);
        assert_eq!(darken([1.0, 0.5, 0.0, 0.8], 0.5), [0.5, 0.25, 0.0, 0.8]);
    }
}
