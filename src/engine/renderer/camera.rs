// Camera for 2D rendering in screen-style (y-down) world coordinates

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};
use winit::dpi::PhysicalSize;

use crate::core::FloatRect;

/// 2D camera looking at a viewport whose top-left corner is `position`
#[derive(Debug, Clone)]
pub struct Camera {
    /// Top-left of the view in world space
    position: Vec2,
    /// Viewport width
    viewport_width: f32,
    /// Viewport height
    viewport_height: f32,
    /// View-projection matrix
    view_proj: Mat4,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: Vec2, viewport_width: f32, viewport_height: f32) -> Self {
        let mut camera = Self {
            position,
            viewport_width,
            viewport_height,
            view_proj: Mat4::IDENTITY,
        };
        camera.update_view_proj();
        camera
    }

    /// Update the view-projection matrix
    fn update_view_proj(&mut self) {
        // Bottom edge maps to NDC -1 and top edge to +1, so y grows downward
        self.view_proj = Mat4::orthographic_rh(
            self.position.x,
            self.position.x + self.viewport_width,
            self.position.y + self.viewport_height,
            self.position.y,
            -100.0,
            100.0,
        );
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Set camera position
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.update_view_proj();
    }

    /// Center horizontally on `target_x`, staying inside `[0, world_width]`
    pub fn follow(&mut self, target_x: f32, world_width: f32) {
        let max_x = (world_width - self.viewport_width).max(0.0);
        let x = (target_x - self.viewport_width / 2.0).clamp(0.0, max_x);
        self.set_position(Vec2::new(x, self.position.y));
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.update_view_proj();
    }

    /// Resize to a surface of `size` pixels; world units are logical pixels
    pub fn resize_physical(&mut self, size: PhysicalSize<u32>, scale_factor: f64) {
        let logical = size.to_logical::<f32>(scale_factor);
        self.resize(logical.width, logical.height);
    }

    /// Get the view-projection matrix
    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }

    /// The part of the world currently on screen
    pub fn visible_rect(&self) -> FloatRect {
        FloatRect::new(
            self.position.x,
            self.position.y,
            self.viewport_width,
            self.viewport_height,
        )
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Create a new camera uniform from a camera
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}
