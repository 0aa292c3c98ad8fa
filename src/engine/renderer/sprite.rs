// Sprite state and the batched sprite renderer

use anyhow::Result;
use glam::{Mat4, Vec2, Vec4};
use wgpu::util::DeviceExt;

use super::camera::CameraUniform;
use super::draw::DrawCommand;
use super::texture::TextureManager;
use super::vertex::{quad_vertices, Vertex, QUAD_INDICES};
use crate::core::{FloatRect, IntRect};
use crate::engine::assets::{AssetId, TextureHandle};

/// A 2D sprite: a region of a texture placed in the world
#[derive(Debug, Clone)]
pub struct Sprite {
    /// Texture handle (None = untextured placeholder)
    pub texture: Option<TextureHandle>,
    /// Region of the texture to show; negative width mirrors horizontally
    pub texture_rect: IntRect,
    /// Top-left corner in world space
    pub position: Vec2,
    /// Scale applied to the texture rect size
    pub scale: Vec2,
    /// Color tint (RGBA, 1.0 = full color)
    pub color: Vec4,
}

impl Sprite {
    /// Create a new sprite at the origin
    pub fn new(texture: Option<TextureHandle>, texture_rect: IntRect) -> Self {
        Self {
            texture,
            texture_rect,
            position: Vec2::ZERO,
            scale: Vec2::ONE,
            color: Vec4::ONE,
        }
    }

    pub fn set_texture_rect(&mut self, rect: IntRect) {
        self.texture_rect = rect;
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Offset the position
    pub fn move_by(&mut self, offset: Vec2) {
        self.position += offset;
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }

    pub fn is_mirrored(&self) -> bool {
        self.texture_rect.is_mirrored()
    }

    /// Bounds in texture space, before position and scale
    pub fn local_bounds(&self) -> FloatRect {
        FloatRect::from_position_size(Vec2::ZERO, self.texture_rect.abs_size())
    }

    /// Bounds in world space
    pub fn global_bounds(&self) -> FloatRect {
        FloatRect::from_position_size(self.position, self.texture_rect.abs_size() * self.scale)
    }
}

/// A run of consecutive indices sharing one texture
#[derive(Debug, Clone, PartialEq)]
struct Batch {
    texture: Option<AssetId>,
    indices: std::ops::Range<u32>,
}

/// Group consecutive commands by texture, keeping painter's order
fn build_batches<'a>(commands: impl IntoIterator<Item = &'a DrawCommand>) -> Vec<Batch> {
    let mut batches: Vec<Batch> = Vec::new();
    let mut index = 0;

    for command in commands {
        let texture = command.texture.map(|handle| handle.id());
        let end = index + QUAD_INDICES.len() as u32;

        match batches.last_mut() {
            Some(batch) if batch.texture == texture => batch.indices.end = end,
            _ => batches.push(Batch {
                texture,
                indices: index..end,
            }),
        }

        index = end;
    }

    batches
}

/// Sprite renderer drawing textured quads in batches
pub struct SpriteRenderer {
    render_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    texture_bind_group_layout: wgpu::BindGroupLayout,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    batches: Vec<Batch>,
}

impl SpriteRenderer {
    /// Create a new sprite renderer
    pub fn new(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> Result<Self> {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Texture Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Mirrored quads flip winding, so nothing is culled
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let camera_uniform = CameraUniform {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        };

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            render_pipeline,
            camera_buffer,
            camera_bind_group,
            texture_bind_group_layout,
            vertex_buffer: None,
            index_buffer: None,
            batches: Vec::new(),
        })
    }

    /// Build this frame's vertex and index buffers from the visible commands
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        textures: &TextureManager,
        commands: &[&DrawCommand],
    ) {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for command in commands.iter().copied() {
            let texture_size = command.texture.and_then(|handle| textures.size(handle.id()));
            let base = vertices.len() as u32;
            vertices.extend_from_slice(&quad_vertices(command, texture_size));
            indices.extend(QUAD_INDICES.iter().map(|i| base + i));
        }

        self.batches = build_batches(commands.iter().copied());

        if vertices.is_empty() {
            self.vertex_buffer = None;
            self.index_buffer = None;
            return;
        }

        self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.index_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    /// Record the prepared batches into a render pass
    pub fn render<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        textures: &'a TextureManager,
    ) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&self.vertex_buffer, &self.index_buffer)
        else {
            return;
        };

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        for batch in &self.batches {
            let bind_group = batch
                .texture
                .and_then(|id| textures.bind_group(id))
                .unwrap_or_else(|| textures.fallback_bind_group());
            render_pass.set_bind_group(1, bind_group, &[]);
            render_pass.draw_indexed(batch.indices.clone(), 0, 0..1);
        }
    }

    pub fn camera_buffer(&self) -> &wgpu::Buffer {
        &self.camera_buffer
    }

    pub fn texture_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_bind_group_layout
    }

    /// Number of draw calls the last `prepare` produced
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }
}
