// Vertex structure for 2D sprite rendering

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3, Vec4};

use super::draw::DrawCommand;

/// Vertex for 2D sprite rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    /// Position in 3D space (z for layering)
    pub position: [f32; 3],
    /// Texture coordinates (UV)
    pub tex_coords: [f32; 2],
    /// Vertex color (RGBA)
    pub color: [f32; 4],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: Vec3, tex_coords: Vec2, color: Vec4) -> Self {
        Self {
            position: position.to_array(),
            tex_coords: tex_coords.to_array(),
            color: color.to_array(),
        }
    }

    /// Get the vertex buffer layout descriptor
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Tex Coords
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // Color
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Indices of the two triangles making up one quad
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Build the four corners (top-left, top-right, bottom-right, bottom-left)
/// of a draw command.
///
/// `texture_size` is the size of the sampled texture in texels; `None` means
/// the command is drawn with the 1x1 fallback texture and samples all of it.
/// A mirrored source rect produces swapped horizontal UVs.
pub fn quad_vertices(command: &DrawCommand, texture_size: Option<Vec2>) -> [Vertex; 4] {
    let dest = command.destination;

    let (uv_min, uv_max) = match texture_size {
        Some(size) if size.x > 0.0 && size.y > 0.0 => {
            let source = command.source;
            let u0 = source.left as f32 / size.x;
            let v0 = source.top as f32 / size.y;
            let u1 = (source.left + source.width) as f32 / size.x;
            let v1 = (source.top + source.height) as f32 / size.y;
            (Vec2::new(u0, v0), Vec2::new(u1, v1))
        }
        _ => (Vec2::ZERO, Vec2::ONE),
    };

    [
        Vertex::new(Vec3::new(dest.left, dest.top, 0.0), uv_min, command.color),
        Vertex::new(
            Vec3::new(dest.right(), dest.top, 0.0),
            Vec2::new(uv_max.x, uv_min.y),
            command.color,
        ),
        Vertex::new(Vec3::new(dest.right(), dest.bottom(), 0.0), uv_max, command.color),
        Vertex::new(
            Vec3::new(dest.left, dest.bottom(), 0.0),
            Vec2::new(uv_min.x, uv_max.y),
            command.color,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FloatRect, IntRect};

    fn command(source: IntRect) -> DrawCommand {
        DrawCommand {
            texture: None,
            source,
            destination: FloatRect::new(10.0, 20.0, 50.0, 50.0),
            color: Vec4::ONE,
        }
    }

    #[test]
    fn test_quad_corners_follow_destination() {
        let vertices =
            quad_vertices(&command(IntRect::new(0, 0, 16, 16)), Some(Vec2::new(96.0, 16.0)));
        assert_eq!(vertices[0].position, [10.0, 20.0, 0.0]);
        assert_eq!(vertices[1].position, [60.0, 20.0, 0.0]);
        assert_eq!(vertices[2].position, [60.0, 70.0, 0.0]);
        assert_eq!(vertices[3].position, [10.0, 70.0, 0.0]);
    }

    #[test]
    fn test_quad_uvs_from_source_rect() {
        let vertices =
            quad_vertices(&command(IntRect::new(16, 0, 16, 16)), Some(Vec2::new(64.0, 16.0)));
        assert_eq!(vertices[0].tex_coords, [0.25, 0.0]);
        assert_eq!(vertices[2].tex_coords, [0.5, 1.0]);
    }

    #[test]
    fn test_mirrored_source_swaps_u() {
        // Frame 1 read right-to-left: texels 32 down to 16
        let vertices =
            quad_vertices(&command(IntRect::new(32, 0, -16, 16)), Some(Vec2::new(64.0, 16.0)));
        assert_eq!(vertices[0].tex_coords, [0.5, 0.0]);
        assert_eq!(vertices[1].tex_coords, [0.25, 0.0]);
    }

    #[test]
    fn test_untextured_command_samples_whole_fallback() {
        let vertices = quad_vertices(&command(IntRect::new(16, 0, 16, 16)), None);
        assert_eq!(vertices[0].tex_coords, [0.0, 0.0]);
        assert_eq!(vertices[2].tex_coords, [1.0, 1.0]);
    }
}
