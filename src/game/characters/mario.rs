// The player character

use glam::{Vec2, Vec4};
use log::{debug, trace};

use super::state::{Idle, MarioState, MarioStateKind};
use super::stats::{MarioStats, MARIO_STATS};
use crate::core::math::approach;
use crate::core::{Direction, FloatRect, IntRect};
use crate::engine::animation::Animator;
use crate::engine::assets::TextureHandle;
use crate::engine::input::{Action, ActionState};
use crate::engine::physics::Resolution;
use crate::engine::renderer::{RenderTarget, Sprite};
use crate::game::object::GameObject;

/// Tint used when the Mario texture could not be loaded
const PLACEHOLDER_COLOR: Vec4 = Vec4::new(0.85, 0.1, 0.1, 1.0);

/// Controls Mario reads each tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MarioInput {
    /// -1.0 (left) ..= 1.0 (right)
    pub horizontal: f32,
    /// Jump went down this frame
    pub jump_pressed: bool,
    /// Jump is being held
    pub jump_held: bool,
}

impl MarioInput {
    pub fn from_actions(actions: &ActionState) -> Self {
        Self {
            horizontal: actions.horizontal(),
            jump_pressed: actions.just_pressed(Action::Jump),
            jump_held: actions.is_pressed(Action::Jump),
        }
    }
}

/// Snapshot of Mario the animation conditions look at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarioView {
    pub state: MarioStateKind,
    pub direction: Direction,
    pub is_sliding: bool,
}

pub struct Mario {
    sprite: Sprite,
    animator: Animator<MarioView>,
    stats: MarioStats,

    state: Option<Box<dyn MarioState>>,
    state_kind: MarioStateKind,

    pub(super) velocity: Vec2,
    direction: Direction,
    is_ground: bool,

    is_sliding: bool,
    slide_time: f32,

    /// y where the current jump started
    pub(super) jump_start_pos: f32,
    /// Rising phase of the jump has ended
    pub(super) is_jump_over: bool,

    input: MarioInput,
    previous_position: Vec2,
}

impl Mario {
    /// Create Mario standing (idle) at `position`
    pub fn new(texture: Option<TextureHandle>, position: Vec2) -> Self {
        let stats = MARIO_STATS;

        let mut sprite = Sprite::new(
            texture,
            IntRect::new(0, 0, stats.frame_width, stats.frame_height),
        );
        sprite.set_scale(Vec2::splat(stats.sprite_scale));
        sprite.set_position(position);
        if sprite.texture.is_none() {
            sprite.color = PLACEHOLDER_COLOR;
        }

        let mut mario = Self {
            animator: Self::build_animator(&sprite, &stats),
            sprite,
            stats,
            state: None,
            state_kind: MarioStateKind::Idle,
            velocity: Vec2::ZERO,
            direction: Direction::Right,
            is_ground: false,
            is_sliding: false,
            slide_time: 0.0,
            jump_start_pos: 0.0,
            is_jump_over: false,
            input: MarioInput::default(),
            previous_position: position,
        };
        mario.set_state(Box::new(Idle));
        mario
    }

    fn build_animator(sprite: &Sprite, stats: &MarioStats) -> Animator<MarioView> {
        let frame = sprite.local_bounds();
        let mut animator: Animator<MarioView> =
            Animator::new(frame.width as i32, frame.height as i32);
        let facing = |view: &MarioView| view.direction;
        let speed = stats.frame_time;

        animator.add_frame_animation(
            0,
            0,
            speed,
            |view| view.state == MarioStateKind::Idle,
            facing,
            true,
            5,
            "Idle",
        );
        animator.add_frame_animation(
            1,
            3,
            speed,
            |view| view.state == MarioStateKind::Walk,
            facing,
            true,
            5,
            "Run",
        );
        animator.add_frame_animation(
            4,
            4,
            speed,
            |view| view.is_sliding && view.state == MarioStateKind::Walk,
            facing,
            true,
            10,
            "Slide",
        );
        animator.add_frame_animation(
            5,
            5,
            speed,
            |view| view.state == MarioStateKind::Jump,
            facing,
            false,
            5,
            "Jump",
        );

        trace!(
            "Mario animator: {} animations over {:?} px frames",
            animator.len(),
            animator.frame_size()
        );
        animator
    }

    // Accessors

    pub fn position(&self) -> Vec2 {
        self.sprite.position
    }

    pub fn bounds(&self) -> FloatRect {
        self.sprite.global_bounds()
    }

    /// Bounds before the last `update` moved the sprite
    pub fn previous_bounds(&self) -> FloatRect {
        FloatRect::from_position_size(self.previous_position, self.bounds().size())
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_ground(&self) -> bool {
        self.is_ground
    }

    pub fn is_sliding(&self) -> bool {
        self.is_sliding
    }

    pub fn is_jump_over(&self) -> bool {
        self.is_jump_over
    }

    /// How far above the jump's starting point Mario is
    pub fn jump_height(&self) -> f32 {
        self.jump_start_pos - self.position().y
    }

    pub fn state(&self) -> MarioStateKind {
        self.state_kind
    }

    pub fn stats(&self) -> &MarioStats {
        &self.stats
    }

    pub fn input(&self) -> MarioInput {
        self.input
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn animator(&self) -> &Animator<MarioView> {
        &self.animator
    }

    pub fn view(&self) -> MarioView {
        MarioView {
            state: self.state_kind,
            direction: self.direction,
            is_sliding: self.is_sliding,
        }
    }

    // Modifiers

    pub fn set_input(&mut self, input: MarioInput) {
        self.input = input;
    }

    pub fn set_ground(&mut self, is_ground: bool) {
        self.is_ground = is_ground;
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.sprite.set_position(position);
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn flip(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Leave the current state (running its exit hook) and enter `next`
    pub fn set_state(&mut self, mut next: Box<dyn MarioState>) {
        if let Some(mut previous) = self.state.take() {
            previous.on_exit(self);
            debug!(
                "Mario: {:?} -> {:?} (was showing {})",
                previous.kind(),
                next.kind(),
                self.animator.current_animation().unwrap_or("nothing")
            );
        }

        self.state_kind = next.kind();
        next.on_enter(self);
        self.state = Some(next);
    }

    // Movement model

    /// Accelerate horizontally toward `dir_x`, clamped to max velocity
    pub fn move_horizontal(&mut self, dir_x: f32, dt: f32) {
        self.velocity.x += dir_x * self.stats.acceleration.x * dt;
        self.velocity.x = self
            .velocity
            .x
            .clamp(-self.stats.max_velocity.x, self.stats.max_velocity.x);
    }

    pub fn apply_gravity(&mut self, dt: f32) {
        self.velocity.y =
            (self.velocity.y + self.stats.gravity * dt).min(self.stats.max_velocity.y);
    }

    /// Slow horizontal velocity toward zero
    pub fn decelerate(&mut self, dt: f32) {
        self.velocity.x = approach(self.velocity.x, 0.0, self.stats.deceleration * dt);
    }

    /// Start skidding when facing against the motion; a skid lasts
    /// `slide_time_max` or until Mario stops
    pub fn check_slide(&mut self, dt: f32) {
        if !self.is_sliding {
            let against_motion = match self.direction {
                Direction::Left => self.velocity.x > 0.0,
                Direction::Right => self.velocity.x < 0.0,
            };
            if against_motion {
                self.is_sliding = true;
                trace!("Mario started sliding at vx {}", self.velocity.x);
            }
        }

        if self.is_sliding {
            self.slide_time += dt;
            if self.slide_time >= self.stats.slide_time_max || self.velocity.x == 0.0 {
                self.stop_sliding();
            }
        }
    }

    pub fn stop_sliding(&mut self) {
        self.is_sliding = false;
        self.slide_time = 0.0;
    }

    /// Bumped his head: stop rising
    pub fn hit_ceiling(&mut self) {
        if self.velocity.y < 0.0 {
            self.velocity.y = 0.0;
        }
        self.is_jump_over = true;
    }

    /// Apply the push-out computed by the collision pass
    pub fn apply_collision(&mut self, resolution: &Resolution) {
        self.sprite.move_by(resolution.offset);

        if resolution.grounded && self.velocity.y > 0.0 {
            self.velocity.y = 0.0;
        }
        if resolution.blocked_x {
            self.velocity.x = 0.0;
        }
        self.is_ground = resolution.grounded;

        if resolution.ceiling.is_some() {
            self.hit_ceiling();
        }
    }

    /// Put Mario back at `position`, standing still
    pub fn respawn(&mut self, position: Vec2) {
        self.set_position(position);
        self.previous_position = position;
        self.velocity = Vec2::ZERO;
        self.direction = Direction::Right;
        self.is_ground = false;
        self.stop_sliding();
        self.set_state(Box::new(Idle));
    }

    /// Advance one tick: state logic, integration, animation
    pub fn update(&mut self, dt: f32) {
        self.previous_position = self.position();

        if let Some(mut state) = self.state.take() {
            let next = state.on_update(self, dt);
            self.state = Some(state);
            if let Some(next) = next {
                self.set_state(next);
            }
        }

        self.sprite.move_by(self.velocity * dt);

        let view = self.view();
        self.animator.update(&view, &mut self.sprite, dt);
    }

    pub fn render(&self, target: &mut dyn RenderTarget) {
        target.draw_sprite(&self.sprite);
    }
}

impl GameObject for Mario {
    fn object_type(&self) -> &str {
        "Mario"
    }

    fn bounds(&self) -> FloatRect {
        Mario::bounds(self)
    }

    fn position(&self) -> Vec2 {
        Mario::position(self)
    }

    fn set_position(&mut self, position: Vec2) {
        Mario::set_position(self, position);
    }

    fn update(&mut self, dt: f32) {
        Mario::update(self, dt);
    }

    fn render(&self, target: &mut dyn RenderTarget) {
        Mario::render(self, target);
    }
}
