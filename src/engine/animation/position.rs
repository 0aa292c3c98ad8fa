// Position-based animation: out to a second point and back

use glam::Vec2;

use super::{Animation, AnimationClock, AnimationInfo, Playback};
use crate::core::math::move_towards;
use crate::engine::renderer::Sprite;

/// Moves the sprite from `from` to `to` and back at `speed` pixels per second
pub struct PosAnimation<C> {
    info: AnimationInfo<C>,
    speed: f32,
    looped: bool,
    from: Vec2,
    to: Vec2,
    moving_to_second: bool,
}

impl<C> PosAnimation<C> {
    pub fn new(info: AnimationInfo<C>, speed: f32, looped: bool, (from, to): (Vec2, Vec2)) -> Self {
        Self {
            info,
            speed,
            looped,
            from,
            to,
            moving_to_second: true,
        }
    }

    #[cfg(test)]
    pub fn is_moving_to_second(&self) -> bool {
        self.moving_to_second
    }
}

impl<C> Animation<C> for PosAnimation<C> {
    fn info(&self) -> &AnimationInfo<C> {
        &self.info
    }

    fn reset(&mut self) {
        self.moving_to_second = true;
    }

    fn translate(&mut self, offset: Vec2) {
        self.from += offset;
        self.to += offset;
    }

    fn play(&mut self, sprite: &mut Sprite, _ctx: &C, clock: AnimationClock) -> Playback {
        let target = if self.moving_to_second { self.to } else { self.from };
        let (position, arrived) = move_towards(sprite.position, target, self.speed * clock.dt);
        sprite.set_position(position);

        if !arrived {
            return Playback::Running;
        }

        if self.moving_to_second {
            self.moving_to_second = false;
            return Playback::Running;
        }

        self.moving_to_second = true;
        if self.looped {
            Playback::Running
        } else {
            Playback::Finished
        }
    }
}
