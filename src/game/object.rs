// Common interface of things placed in a level

use glam::Vec2;

use crate::core::FloatRect;
use crate::engine::renderer::RenderTarget;

pub trait GameObject {
    /// Short type name, for logs
    fn object_type(&self) -> &str;

    /// World-space bounds of what is drawn
    fn bounds(&self) -> FloatRect;

    fn position(&self) -> Vec2;

    fn set_position(&mut self, position: Vec2);

    fn update(&mut self, dt: f32);

    fn render(&self, target: &mut dyn RenderTarget);
}
