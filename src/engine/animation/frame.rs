// Frame-based animation over a horizontal sprite strip

use super::{Animation, AnimationClock, AnimationInfo, DirectionFn, Playback};
use crate::core::{Direction, IntRect};
use crate::engine::renderer::Sprite;

/// Steps through frames `first..=last` of a strip, one frame every `speed`
/// seconds, mirroring the texture rect when facing left
pub struct FrameAnimation<C> {
    info: AnimationInfo<C>,
    frame_width: i32,
    frame_height: i32,
    frames: (i32, i32),
    current_frame: i32,
    speed: f32,
    last_play_time: f32,
    direction: DirectionFn<C>,
    looped: bool,
    finished: bool,
}

impl<C> FrameAnimation<C> {
    pub fn new(
        info: AnimationInfo<C>,
        frame_width: i32,
        frame_height: i32,
        frames: (i32, i32),
        speed: f32,
        direction: DirectionFn<C>,
        looped: bool,
    ) -> Self {
        Self {
            info,
            frame_width,
            frame_height,
            frames,
            current_frame: frames.0,
            speed,
            last_play_time: 0.0,
            direction,
            looped,
            finished: false,
        }
    }

    /// Frame that will be shown next
    pub fn current_frame(&self) -> i32 {
        self.current_frame
    }

    /// Texture rect of `frame`; facing left reads it right-to-left
    fn frame_rect(&self, frame: i32, direction: Direction) -> IntRect {
        let left = self.frame_width * frame;
        match direction {
            Direction::Right => IntRect::new(left, 0, self.frame_width, self.frame_height),
            Direction::Left => IntRect::new(
                left + self.frame_width,
                0,
                -self.frame_width,
                self.frame_height,
            ),
        }
    }

    fn playback(&self) -> Playback {
        if self.finished {
            Playback::Finished
        } else {
            Playback::Running
        }
    }
}

impl<C> Animation<C> for FrameAnimation<C> {
    fn info(&self) -> &AnimationInfo<C> {
        &self.info
    }

    fn reset(&mut self) {
        self.current_frame = self.frames.0;
        // Show the first frame on the very next tick
        self.last_play_time = f32::NEG_INFINITY;
        self.finished = false;
    }

    fn play(&mut self, sprite: &mut Sprite, ctx: &C, clock: AnimationClock) -> Playback {
        if self.last_play_time + self.speed >= clock.timer {
            return self.playback();
        }

        let (first, last) = self.frames;
        let shown = self.current_frame;
        sprite.set_texture_rect(self.frame_rect(shown, (self.direction)(ctx)));

        self.current_frame += 1;
        if self.current_frame > last {
            self.current_frame = if self.looped { first } else { last };
        }
        self.last_play_time = clock.timer;

        if !self.looped && shown == last {
            self.finished = true;
        }

        self.playback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Facing(Direction);

    fn strip(first: i32, last: i32, looped: bool) -> FrameAnimation<Facing> {
        FrameAnimation::new(
            AnimationInfo::new("Run", 5, Box::new(|_: &Facing| true)),
            16,
            16,
            (first, last),
            0.05,
            Box::new(|f: &Facing| f.0),
            looped,
        )
    }

    fn clock(timer: f32) -> AnimationClock {
        AnimationClock { timer, dt: 0.06 }
    }

    #[test]
    fn test_waits_for_speed_interval() {
        let mut animation = strip(1, 3, true);
        let mut sprite = Sprite::new(None, IntRect::new(0, 0, 16, 16));
        let facing = Facing(Direction::Right);

        // last_play_time starts at 0, so nothing happens until timer > 0.05
        animation.play(&mut sprite, &facing, clock(0.04));
        assert_eq!(sprite.texture_rect, IntRect::new(0, 0, 16, 16));

        animation.play(&mut sprite, &facing, clock(0.06));
        assert_eq!(sprite.texture_rect, IntRect::new(16, 0, 16, 16));

        animation.play(&mut sprite, &facing, clock(0.10));
        assert_eq!(sprite.texture_rect.left, 16, "too soon for the next frame");
    }

    #[test]
    fn test_looped_wraps_to_first_frame() {
        let mut animation = strip(1, 3, true);
        let mut sprite = Sprite::new(None, IntRect::new(0, 0, 16, 16));
        let facing = Facing(Direction::Right);

        let mut lefts = Vec::new();
        for tick in 1..=5 {
            let status = animation.play(&mut sprite, &facing, clock(tick as f32 * 0.06));
            assert_eq!(status, Playback::Running);
            lefts.push(sprite.texture_rect.left);
        }
        assert_eq!(lefts, vec![16, 32, 48, 16, 32]);
    }

    #[test]
    fn test_one_shot_holds_last_frame() {
        let mut animation = strip(0, 1, false);
        let mut sprite = Sprite::new(None, IntRect::new(0, 0, 16, 16));
        let facing = Facing(Direction::Right);

        assert_eq!(animation.play(&mut sprite, &facing, clock(0.06)), Playback::Running);
        assert_eq!(animation.play(&mut sprite, &facing, clock(0.12)), Playback::Finished);
        assert_eq!(animation.play(&mut sprite, &facing, clock(0.18)), Playback::Finished);
        assert_eq!(sprite.texture_rect.left, 16);
        assert_eq!(animation.current_frame(), 1);
    }

    #[test]
    fn test_facing_left_mirrors_rect() {
        let mut animation = strip(1, 3, true);
        let mut sprite = Sprite::new(None, IntRect::new(0, 0, 16, 16));

        animation.play(&mut sprite, &Facing(Direction::Left), clock(0.06));
        assert_eq!(sprite.texture_rect, IntRect::new(32, 0, -16, 16));
        assert!(sprite.is_mirrored());
    }

    #[test]
    fn test_reset_shows_first_frame_immediately() {
        let mut animation = strip(1, 3, true);
        let mut sprite = Sprite::new(None, IntRect::new(0, 0, 16, 16));
        let facing = Facing(Direction::Right);

        animation.play(&mut sprite, &facing, clock(0.06));
        animation.play(&mut sprite, &facing, clock(0.12));
        animation.reset();

        animation.play(&mut sprite, &facing, clock(0.13));
        assert_eq!(sprite.texture_rect.left, 16);
        assert_eq!(animation.name(), "Run");
        assert_eq!(animation.priority(), 5);
    }
}
