// Math utilities and helper functions

use glam::Vec2;

/// Distance under which a moving point counts as arrived
pub const ARRIVAL_THRESHOLD: f32 = 0.1;

/// Move `value` toward `target` by at most `step`, never overshooting
pub fn approach(value: f32, target: f32, step: f32) -> f32 {
    if value < target {
        (value + step).min(target)
    } else {
        (value - step).max(target)
    }
}

/// Step a point toward `target` by at most `max_step`.
///
/// Returns the new point and whether the target has been reached. A point
/// within [`ARRIVAL_THRESHOLD`] of the target snaps onto it.
pub fn move_towards(current: Vec2, target: Vec2, max_step: f32) -> (Vec2, bool) {
    let delta = target - current;
    let distance = delta.length();

    if distance <= ARRIVAL_THRESHOLD {
        return (target, true);
    }

    let step = delta / distance * distance.min(max_step);
    (current + step, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_approach_does_not_overshoot() {
        assert_eq!(approach(10.0, 0.0, 4.0), 6.0);
        assert_eq!(approach(3.0, 0.0, 4.0), 0.0);
        assert_eq!(approach(-3.0, 0.0, 4.0), 0.0);
        assert_eq!(approach(-10.0, 0.0, 4.0), -6.0);
    }

    #[test]
    fn test_move_towards_steps_by_speed() {
        let (point, arrived) = move_towards(Vec2::ZERO, Vec2::new(10.0, 0.0), 4.0);
        assert!(!arrived);
        assert_relative_eq!(point.x, 4.0);
        assert_relative_eq!(point.y, 0.0);
    }

    #[test]
    fn test_move_towards_clamps_to_remaining_distance() {
        let (point, arrived) = move_towards(Vec2::ZERO, Vec2::new(0.0, -3.0), 10.0);
        // Lands exactly on the target but only reports arrival next step
        assert!(!arrived);
        assert_relative_eq!(point.y, -3.0);

        let (point, arrived) = move_towards(point, Vec2::new(0.0, -3.0), 10.0);
        assert!(arrived);
        assert_eq!(point, Vec2::new(0.0, -3.0));
    }

    #[test]
    fn test_move_towards_snaps_inside_threshold() {
        let (point, arrived) = move_towards(Vec2::new(5.05, 0.0), Vec2::new(5.0, 0.0), 1.0);
        assert!(arrived);
        assert_eq!(point, Vec2::new(5.0, 0.0));
    }
}
