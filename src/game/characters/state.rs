// Mario's behaviour states
//
// Each state gets enter / update / exit hooks with mutable access to Mario.
// `on_update` returns the state to switch to, and Mario performs the switch
// once the current state has been put back.

use std::fmt::Debug;

use super::mario::Mario;
use crate::core::Direction;

/// Which state Mario is in, for animation conditions and queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MarioStateKind {
    #[default]
    Idle,
    Walk,
    Jump,
}

pub trait MarioState: Debug {
    fn kind(&self) -> MarioStateKind;

    fn on_enter(&mut self, _mario: &mut Mario) {}

    /// Run one tick; `Some(next)` requests a transition
    fn on_update(&mut self, mario: &mut Mario, dt: f32) -> Option<Box<dyn MarioState>>;

    fn on_exit(&mut self, _mario: &mut Mario) {}
}

/// Run toward the held direction, or slow down when none is held
fn steer(mario: &mut Mario, dt: f32) {
    let horizontal = mario.input().horizontal;
    match Direction::from_axis(horizontal) {
        Some(direction) => {
            mario.flip(direction);
            mario.move_horizontal(horizontal, dt);
        }
        None => mario.decelerate(dt),
    }
}

fn wants_jump(mario: &Mario) -> bool {
    mario.input().jump_pressed && mario.is_ground()
}

/// Standing still
#[derive(Debug, Default)]
pub struct Idle;

impl MarioState for Idle {
    fn kind(&self) -> MarioStateKind {
        MarioStateKind::Idle
    }

    fn on_update(&mut self, mario: &mut Mario, dt: f32) -> Option<Box<dyn MarioState>> {
        mario.apply_gravity(dt);

        if wants_jump(mario) {
            return Some(Box::new(Jump));
        }
        if mario.input().horizontal != 0.0 {
            return Some(Box::new(Walk));
        }

        mario.decelerate(dt);
        None
    }
}

/// Running on the ground, including the skid when turning around
#[derive(Debug, Default)]
pub struct Walk;

impl MarioState for Walk {
    fn kind(&self) -> MarioStateKind {
        MarioStateKind::Walk
    }

    fn on_update(&mut self, mario: &mut Mario, dt: f32) -> Option<Box<dyn MarioState>> {
        if wants_jump(mario) {
            return Some(Box::new(Jump));
        }

        steer(mario, dt);
        mario.check_slide(dt);
        mario.apply_gravity(dt);

        if mario.input().horizontal == 0.0 && mario.velocity().x == 0.0 {
            return Some(Box::new(Idle));
        }
        None
    }
}

/// Airborne after a jump.
///
/// The rise keeps a constant upward speed while jump is held, up to
/// `jump_height`, and always lasts at least `min_jump_height`. After that
/// gravity takes over until Mario lands.
#[derive(Debug, Default)]
pub struct Jump;

impl MarioState for Jump {
    fn kind(&self) -> MarioStateKind {
        MarioStateKind::Jump
    }

    fn on_enter(&mut self, mario: &mut Mario) {
        mario.jump_start_pos = mario.position().y;
        mario.is_jump_over = false;
        mario.set_ground(false);
        mario.velocity.y = -mario.stats().jump_speed;
    }

    fn on_update(&mut self, mario: &mut Mario, dt: f32) -> Option<Box<dyn MarioState>> {
        steer(mario, dt);

        if !mario.is_jump_over {
            let stats = *mario.stats();
            let risen = mario.jump_height();
            let held = mario.input().jump_held;

            if (held && risen < stats.jump_height) || risen < stats.min_jump_height {
                mario.velocity.y = -stats.jump_speed;
            } else {
                mario.is_jump_over = true;
            }
        }

        if mario.is_jump_over {
            mario.apply_gravity(dt);

            if mario.is_ground() {
                let moving = mario.input().horizontal != 0.0 || mario.velocity().x != 0.0;
                let next: Box<dyn MarioState> = if moving {
                    Box::new(Walk)
                } else {
                    Box::new(Idle)
                };
                return Some(next);
            }
        }

        None
    }

    fn on_exit(&mut self, mario: &mut Mario) {
        mario.stop_sliding();
    }
}
