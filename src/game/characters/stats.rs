// Mario's movement and presentation constants

use glam::Vec2;

/// Tuning values for the player character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarioStats {
    // Movement
    /// Velocity clamp on each axis (px/s); y only limits falling
    pub max_velocity: Vec2,
    /// Horizontal run acceleration in x (px/s²)
    pub acceleration: Vec2,
    /// Velocity lost per second when no direction is held
    pub deceleration: f32,
    /// Downward acceleration (px/s²)
    pub gravity: f32,

    // Jumping
    /// Upward speed held while the jump is rising
    pub jump_speed: f32,
    /// Highest rise while jump is held (px)
    pub jump_height: f32,
    /// Rise a tapped jump still gets (px)
    pub min_jump_height: f32,

    /// How long a skid lasts when turning around (seconds)
    pub slide_time_max: f32,

    // Sprite
    pub sprite_scale: f32,
    pub frame_width: i32,
    pub frame_height: i32,
    /// Seconds per animation frame
    pub frame_time: f32,
}

pub const MARIO_STATS: MarioStats = MarioStats {
    max_velocity: Vec2::new(400.0, 400.0),
    acceleration: Vec2::new(750.0, 1.0),
    deceleration: 750.0,
    gravity: 980.0,

    jump_speed: 400.0,
    jump_height: 150.0,
    min_jump_height: 25.0,

    slide_time_max: 0.65,

    // 16 px frames drawn as 50 px tiles
    sprite_scale: 3.125,
    frame_width: 16,
    frame_height: 16,
    frame_time: 0.05,
};

impl Default for MarioStats {
    fn default() -> Self {
        MARIO_STATS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats() {
        let stats = MarioStats::default();
        assert_eq!(stats.max_velocity, Vec2::new(400.0, 400.0));
        assert_eq!(stats.gravity, 980.0);
        assert_eq!(stats.slide_time_max, 0.65);
    }

    #[test]
    fn test_scaled_frame_is_one_tile() {
        let frame = Vec2::new(
            MARIO_STATS.frame_width as f32,
            MARIO_STATS.frame_height as f32,
        );
        assert_eq!(frame * MARIO_STATS.sprite_scale, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_tap_jump_is_lower_than_held_jump() {
        assert!(MARIO_STATS.min_jump_height < MARIO_STATS.jump_height);
    }
}
