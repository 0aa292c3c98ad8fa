// Sprite animation: competing animations chosen by priority and condition
//
// An `Animator` owns a list of animations. Every tick it plays the
// highest-priority animation whose condition holds for the owner's current
// context, unless an animation was explicitly requested with `play_anim`,
// in which case that one runs alone until it reports `Finished`.
//
// Conditions and direction callbacks read a context value `C` passed to
// `update` (a snapshot of the owner) instead of borrowing the owner itself.

mod frame;
mod position;

pub use frame::FrameAnimation;
pub use position::PosAnimation;

use glam::Vec2;
use log::debug;

use crate::core::Direction;
use crate::engine::renderer::Sprite;

/// Gating condition of an animation
pub type Condition<C> = Box<dyn Fn(&C) -> bool>;

/// Facing callback used to mirror frame animations
pub type DirectionFn<C> = Box<dyn Fn(&C) -> Direction>;

/// Animation errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AnimationError {
    #[error("Unknown animation: {0}")]
    UnknownAnimation(String),
}

/// Result of playing one tick of an animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Running,
    Finished,
}

/// Timing handed to an animation each tick
#[derive(Debug, Clone, Copy)]
pub struct AnimationClock {
    /// Total time the animator has been running
    pub timer: f32,
    /// Time since the previous tick
    pub dt: f32,
}

/// Name, priority and condition shared by every animation kind
pub struct AnimationInfo<C> {
    pub name: String,
    pub priority: i32,
    pub condition: Condition<C>,
}

impl<C> AnimationInfo<C> {
    pub fn new(name: &str, priority: i32, condition: Condition<C>) -> Self {
        Self {
            name: name.to_string(),
            priority,
            condition,
        }
    }
}

/// Something an `Animator` can play
pub trait Animation<C> {
    fn info(&self) -> &AnimationInfo<C>;

    /// Rewind to the initial state
    fn reset(&mut self);

    /// Advance one tick, writing into the sprite
    fn play(&mut self, sprite: &mut Sprite, ctx: &C, clock: AnimationClock) -> Playback;

    fn name<'a>(&'a self) -> &'a str
    where
        C: 'a,
    {
        &self.info().name
    }

    fn priority(&self) -> i32 {
        self.info().priority
    }

    /// Whether the gating condition holds
    fn is_active(&self, ctx: &C) -> bool {
        (self.info().condition)(ctx)
    }

    /// Shift any world-space points this animation moves between
    fn translate(&mut self, _offset: Vec2) {}
}

/// Plays the highest-priority active animation on a sprite
pub struct Animator<C> {
    frame_width: i32,
    frame_height: i32,
    animations: Vec<Box<dyn Animation<C>>>,
    timer: f32,
    /// Animation selected by condition on the last tick
    current: Option<usize>,
    /// Animation requested by name, running until it finishes
    forced: Option<usize>,
}

impl<C: 'static> Animator<C> {
    pub fn new(frame_width: i32, frame_height: i32) -> Self {
        Self {
            frame_width,
            frame_height,
            animations: Vec::new(),
            timer: 0.0,
            current: None,
            forced: None,
        }
    }

    /// Add any animation
    pub fn add_animation(&mut self, animation: Box<dyn Animation<C>>) {
        self.animations.push(animation);
    }

    /// Add a frame animation over frames `first..=last` of a horizontal strip
    /// of this animator's frame size
    #[allow(clippy::too_many_arguments)]
    pub fn add_frame_animation(
        &mut self,
        first_frame: i32,
        last_frame: i32,
        speed: f32,
        condition: impl Fn(&C) -> bool + 'static,
        direction: impl Fn(&C) -> Direction + 'static,
        looped: bool,
        priority: i32,
        name: &str,
    ) {
        let animation = FrameAnimation::new(
            AnimationInfo::new(name, priority, Box::new(condition)),
            self.frame_width,
            self.frame_height,
            (first_frame, last_frame),
            speed,
            Box::new(direction),
            looped,
        );
        self.add_animation(Box::new(animation));
    }

    /// Add a position animation moving between `positions.0` and `positions.1`
    pub fn add_pos_animation(
        &mut self,
        speed: f32,
        condition: impl Fn(&C) -> bool + 'static,
        looped: bool,
        priority: i32,
        positions: (Vec2, Vec2),
        name: &str,
    ) {
        let animation = PosAnimation::new(
            AnimationInfo::new(name, priority, Box::new(condition)),
            speed,
            looped,
            positions,
        );
        self.add_animation(Box::new(animation));
    }

    /// Play an animation by name until it finishes, ignoring conditions
    pub fn play_anim(&mut self, name: &str) -> Result<(), AnimationError> {
        let index = self
            .animations
            .iter()
            .position(|animation| animation.name() == name)
            .ok_or_else(|| AnimationError::UnknownAnimation(name.to_string()))?;

        self.animations[index].reset();
        self.forced = Some(index);
        self.current = None;
        debug!("Playing animation {} on request", name);
        Ok(())
    }

    /// Advance the animator by `dt` seconds
    pub fn update(&mut self, ctx: &C, sprite: &mut Sprite, dt: f32) {
        self.timer += dt;
        let clock = AnimationClock {
            timer: self.timer,
            dt,
        };

        if let Some(index) = self.forced {
            let animation = &mut self.animations[index];
            if animation.play(sprite, ctx, clock) == Playback::Finished {
                debug!("Requested animation {} finished", animation.name());
                self.forced = None;
            }
            return;
        }

        let Some(index) = self.select(ctx) else {
            self.current = None;
            return;
        };

        if self.current != Some(index) {
            self.animations[index].reset();
            debug!(
                "Animation switched to {} (priority {})",
                self.animations[index].name(),
                self.animations[index].priority()
            );
            self.current = Some(index);
        }

        self.animations[index].play(sprite, ctx, clock);
    }

    /// Follow the owner when it is moved by `offset`
    pub fn translate(&mut self, offset: Vec2) {
        for animation in &mut self.animations {
            animation.translate(offset);
        }
    }

    /// Highest-priority active animation; ties go to the earliest added
    fn select(&self, ctx: &C) -> Option<usize> {
        let mut best: Option<(usize, i32)> = None;

        for (index, animation) in self.animations.iter().enumerate() {
            if !animation.is_active(ctx) {
                continue;
            }
            if best.map_or(true, |(_, priority)| animation.priority() > priority) {
                best = Some((index, animation.priority()));
            }
        }

        best.map(|(index, _)| index)
    }

    /// Name of the animation that played on the last tick
    pub fn current_animation(&self) -> Option<&str> {
        self.forced
            .or(self.current)
            .map(|index| self.animations[index].name())
    }

    /// Whether a requested animation is still running
    pub fn is_forced(&self) -> bool {
        self.forced.is_some()
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn frame_size(&self) -> (i32, i32) {
        (self.frame_width, self.frame_height)
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}
