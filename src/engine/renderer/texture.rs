// GPU textures uploaded from decoded asset images

use std::collections::HashMap;

use glam::Vec2;

use crate::engine::assets::{AssetId, TextureData};

/// A texture living on the GPU together with its bind group
pub struct GpuTexture {
    pub bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
}

impl GpuTexture {
    /// Upload RGBA8 pixels
    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        pixels: &[u8],
        width: u32,
        height: u32,
        label: Option<&str>,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        // Pixel art: no filtering
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label,
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self {
            bind_group,
            width,
            height,
        }
    }
}

/// GPU copies of the loaded textures, keyed by asset id
pub struct TextureManager {
    textures: HashMap<AssetId, GpuTexture>,
    /// 1x1 white texture for untextured sprites
    fallback: GpuTexture,
}

impl TextureManager {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let fallback = GpuTexture::from_rgba(
            device,
            queue,
            layout,
            &[255, 255, 255, 255],
            1,
            1,
            Some("Fallback Texture"),
        );

        Self {
            textures: HashMap::new(),
            fallback,
        }
    }

    /// Upload a decoded texture, replacing any previous upload of the same id
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        id: AssetId,
        data: &TextureData,
    ) {
        let texture = GpuTexture::from_rgba(
            device,
            queue,
            layout,
            data.pixels.as_raw(),
            data.width(),
            data.height(),
            Some(&data.name),
        );
        self.textures.insert(id, texture);
    }

    /// Size in texels of an uploaded texture
    pub fn size(&self, id: AssetId) -> Option<Vec2> {
        self.textures
            .get(&id)
            .map(|texture| Vec2::new(texture.width as f32, texture.height as f32))
    }

    pub fn bind_group(&self, id: AssetId) -> Option<&wgpu::BindGroup> {
        self.textures.get(&id).map(|texture| &texture.bind_group)
    }

    pub fn fallback_bind_group(&self) -> &wgpu::BindGroup {
        &self.fallback.bind_group
    }

    /// Get the number of uploaded textures
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}
