// Draw commands produced by game objects and consumed by the renderer

use glam::Vec4;

use super::sprite::Sprite;
use crate::core::{FloatRect, IntRect};
use crate::engine::assets::TextureHandle;

/// Something sprites can be drawn onto
pub trait RenderTarget {
    fn draw_sprite(&mut self, sprite: &Sprite);
}

/// One textured quad to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    /// Texture to sample (None = untextured, drawn with `color`)
    pub texture: Option<TextureHandle>,
    /// Region of the texture in texels; negative width mirrors
    pub source: IntRect,
    /// Where the quad lands in world pixels
    pub destination: FloatRect,
    /// Color tint
    pub color: Vec4,
}

impl DrawCommand {
    pub fn from_sprite(sprite: &Sprite) -> Self {
        Self {
            texture: sprite.texture,
            source: sprite.texture_rect,
            destination: sprite.global_bounds(),
            color: sprite.color,
        }
    }
}

/// Draw commands for one frame, in painter's order
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Commands whose destination overlaps `view`
    pub fn visible_in(&self, view: &FloatRect) -> impl Iterator<Item = &DrawCommand> {
        let view = *view;
        self.commands
            .iter()
            .filter(move |command| command.destination.intersects(&view).is_some())
    }
}

impl RenderTarget for DrawList {
    fn draw_sprite(&mut self, sprite: &Sprite) {
        self.commands.push(DrawCommand::from_sprite(sprite));
    }
}
