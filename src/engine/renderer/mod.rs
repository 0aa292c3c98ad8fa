// Rendering: sprite state, draw lists and the wgpu sprite renderer

mod camera;
mod draw;
mod sprite;
mod texture;
mod vertex;

pub use camera::Camera;
pub use draw::{DrawCommand, DrawList, RenderTarget};
pub use sprite::Sprite;

use camera::CameraUniform;
use sprite::SpriteRenderer;
use texture::TextureManager;

use anyhow::Result;
use glam::Vec2;
use log::{info, trace, warn};
use std::sync::Arc;
use winit::window::Window;

use crate::engine::assets::AssetManager;

/// Sky blue behind the level
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.36,
    g: 0.58,
    b: 0.99,
    a: 1.0,
};

/// Main renderer responsible for initializing wgpu and drawing a frame's sprites
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    scale_factor: f64,
    sprite_renderer: SpriteRenderer,
    texture_manager: TextureManager,
    camera: Camera,
}

impl Renderer {
    /// Create a new renderer for the given window
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();
        let scale_factor = window.scale_factor();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        info!("Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no supported formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let sprite_renderer = SpriteRenderer::new(&device, &config)?;
        let texture_manager =
            TextureManager::new(&device, &queue, sprite_renderer.texture_bind_group_layout());
        let mut camera = Camera::new(Vec2::ZERO, config.width as f32, config.height as f32);
        camera.resize_physical(
            winit::dpi::PhysicalSize::new(config.width, config.height),
            scale_factor,
        );

        info!(
            "Renderer initialized with {}x{} resolution (scale factor {})",
            config.width, config.height, scale_factor
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            scale_factor,
            sprite_renderer,
            texture_manager,
            camera,
        })
    }

    /// Upload every texture the asset manager has decoded
    pub fn upload_textures(&mut self, assets: &AssetManager) {
        for (id, data) in assets.textures() {
            self.texture_manager.upload(
                &self.device,
                &self.queue,
                self.sprite_renderer.texture_bind_group_layout(),
                id,
                data,
            );
        }
        info!("Uploaded {} textures", self.texture_manager.texture_count());
    }

    /// Resize the renderer
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.camera.resize_physical(new_size, self.scale_factor);
            info!("Renderer resized to {}x{}", new_size.width, new_size.height);
        }
    }

    /// The window moved to a display with a different DPI
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
        self.camera.resize_physical(self.size, scale_factor);
        info!("Scale factor changed to {}", scale_factor);
    }

    /// Draw the visible part of a frame's draw list
    pub fn render(&mut self, frame: &DrawList) -> Result<()> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost, reconfiguring");
                self.resize(self.size);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let visible_rect = self.camera.visible_rect();
        let visible: Vec<&DrawCommand> = frame.visible_in(&visible_rect).collect();
        self.sprite_renderer
            .prepare(&self.device, &self.texture_manager, &visible);
        trace!(
            "Drawing {} of {} sprites in {} batches",
            visible.len(),
            frame.len(),
            self.sprite_renderer.batch_count()
        );

        let camera_uniform = CameraUniform::new(&self.camera);
        self.queue.write_buffer(
            self.sprite_renderer.camera_buffer(),
            0,
            bytemuck::cast_slice(&[camera_uniform]),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.sprite_renderer
                .render(&mut render_pass, &self.texture_manager);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get a mutable reference to the camera
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }
}
