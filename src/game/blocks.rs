// Level tiles: ground, bricks and question blocks

use glam::{Vec2, Vec4};
use log::{debug, warn};

use crate::core::{Direction, FloatRect, IntRect};
use crate::engine::animation::Animator;
use crate::engine::assets::TextureHandle;
use crate::engine::renderer::{RenderTarget, Sprite};
use crate::game::characters::MARIO_STATS;
use crate::game::object::GameObject;

/// Pixel size of one frame in the block tileset
const TILE_FRAME: i32 = 16;

/// Seconds per frame of the question block shimmer
const BLINK_TIME: f32 = 0.2;

/// Bump travel speed (px/s)
const BUMP_SPEED: f32 = 200.0;

const BUMP_ANIMATION: &str = "Bump";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Ground,
    Brick,
    Question,
}

impl BlockKind {
    /// Tileset frame shown when the block is at rest
    fn frame(self) -> i32 {
        match self {
            BlockKind::Ground => 0,
            BlockKind::Brick => 1,
            BlockKind::Question => 2,
        }
    }

    fn placeholder_color(self) -> Vec4 {
        match self {
            BlockKind::Ground => Vec4::new(0.55, 0.3, 0.1, 1.0),
            BlockKind::Brick => Vec4::new(0.75, 0.35, 0.15, 1.0),
            BlockKind::Question => Vec4::new(0.95, 0.75, 0.1, 1.0),
        }
    }
}

/// Question block frames: 2..=4 shimmer, 5 once emptied
const QUESTION_BLINK: (i32, i32) = (2, 4);
const QUESTION_USED: i32 = 5;
const USED_COLOR: Vec4 = Vec4::new(0.5, 0.35, 0.2, 1.0);

/// What block animations are conditioned on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockView {
    pub used: bool,
}

pub struct Block {
    kind: BlockKind,
    sprite: Sprite,
    animator: Animator<BlockView>,
    /// Resting top-left; the sprite only leaves it while bumping
    origin: Vec2,
    used: bool,
}

impl Block {
    pub fn new(kind: BlockKind, texture: Option<TextureHandle>, position: Vec2) -> Self {
        let scale = MARIO_STATS.sprite_scale;
        let mut sprite = Sprite::new(
            texture,
            IntRect::new(kind.frame() * TILE_FRAME, 0, TILE_FRAME, TILE_FRAME),
        );
        sprite.set_scale(Vec2::splat(scale));
        sprite.set_position(position);
        if sprite.texture.is_none() {
            sprite.color = kind.placeholder_color();
        }

        let mut animator: Animator<BlockView> = Animator::new(TILE_FRAME, TILE_FRAME);
        let facing = |_: &BlockView| Direction::Right;

        match kind {
            BlockKind::Question => {
                let (first, last) = QUESTION_BLINK;
                animator.add_frame_animation(
                    first,
                    last,
                    BLINK_TIME,
                    |view| !view.used,
                    facing,
                    true,
                    1,
                    "Blink",
                );
                animator.add_frame_animation(
                    QUESTION_USED,
                    QUESTION_USED,
                    BLINK_TIME,
                    |view| view.used,
                    facing,
                    true,
                    1,
                    "Used",
                );
            }
            _ => {
                let frame = kind.frame();
                animator.add_frame_animation(
                    frame,
                    frame,
                    BLINK_TIME,
                    |_| true,
                    facing,
                    true,
                    0,
                    "Rest",
                );
            }
        }

        if kind != BlockKind::Ground {
            // A quarter tile up and back down
            let peak = position - Vec2::new(0.0, TILE_FRAME as f32 * scale / 4.0);
            animator.add_pos_animation(
                BUMP_SPEED,
                |_| false,
                false,
                100,
                (position, peak),
                BUMP_ANIMATION,
            );
        }

        Self {
            kind,
            sprite,
            animator,
            origin: position,
            used: false,
        }
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn is_used(&self) -> bool {
        self.used
    }

    pub fn is_bumping(&self) -> bool {
        self.animator.is_forced()
    }

    /// Solid area, independent of any bump offset
    pub fn tile_bounds(&self) -> FloatRect {
        FloatRect::from_position_size(self.origin, self.sprite.global_bounds().size())
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    /// Hit from below. Returns whether the block reacted.
    ///
    /// Ground and emptied question blocks stay put, and a bump in progress
    /// is not restarted.
    pub fn bump(&mut self) -> bool {
        if self.kind == BlockKind::Ground || self.used || self.is_bumping() {
            return false;
        }

        if let Err(err) = self.animator.play_anim(BUMP_ANIMATION) {
            warn!("{:?} block cannot bump: {}", self.kind, err);
            return false;
        }

        if self.kind == BlockKind::Question {
            self.used = true;
            if self.sprite.texture.is_none() {
                self.sprite.color = USED_COLOR;
            }
        }
        debug!("{:?} block at {:?} bumped", self.kind, self.origin);
        true
    }

    pub fn update(&mut self, dt: f32) {
        let view = BlockView { used: self.used };
        self.animator.update(&view, &mut self.sprite, dt);
    }

    pub fn render(&self, target: &mut dyn RenderTarget) {
        target.draw_sprite(&self.sprite);
    }
}

impl GameObject for Block {
    fn object_type(&self) -> &str {
        match self.kind {
            BlockKind::Ground => "Ground",
            BlockKind::Brick => "Brick",
            BlockKind::Question => "Question",
        }
    }

    fn bounds(&self) -> FloatRect {
        self.sprite.global_bounds()
    }

    fn position(&self) -> Vec2 {
        self.sprite.position
    }

    /// Moves the resting spot; a bump in progress keeps its offset
    fn set_position(&mut self, position: Vec2) {
        let offset = position - self.origin;
        self.origin = position;
        self.sprite.move_by(offset);
        self.animator.translate(offset);
    }

    fn update(&mut self, dt: f32) {
        Block::update(self, dt);
    }

    fn render(&self, target: &mut dyn RenderTarget) {
        Block::render(self, target);
    }
}
