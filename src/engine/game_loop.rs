/// Game loop timing and control
///
/// Fixed timestep updates with variable rendering: the world always steps by
/// `FIXED_TIMESTEP` while frames are drawn as fast as the surface allows.
use std::time::{Duration, Instant};

/// Target update rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of updates per frame to prevent spiral of death
pub const MAX_PHYSICS_STEPS: u32 = 5;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

pub struct GameLoop {
    /// Time not yet consumed by fixed updates
    accumulator: Duration,

    last_frame_time: Instant,
    paused: bool,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    frame_count: u64,
    update_count: u64,
    current_fps: f32,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            paused: false,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            update_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame, returns the number of fixed updates to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(frame_time)
    }

    /// Account for `frame_time` of wall clock and return how many fixed
    /// updates it pays for
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut updates = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && updates < MAX_PHYSICS_STEPS {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            updates += 1;
        }

        // A stalled frame (window drag, breakpoint) must not replay later
        if updates == MAX_PHYSICS_STEPS && self.accumulator >= FIXED_TIMESTEP_DURATION {
            log::trace!("Dropping {:?} of backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }

        self.update_count += updates as u64;
        updates
    }

    /// Fixed timestep in seconds
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            log::info!("Game resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.frame_count(), 0);
        assert_eq!(game_loop.update_count(), 0);
        assert!(!game_loop.is_paused());
        assert_relative_eq!(game_loop.fixed_timestep(), 1.0 / 60.0);
    }

    #[test]
    fn test_short_frames_accumulate() {
        let mut game_loop = GameLoop::new();

        assert_eq!(game_loop.advance(Duration::from_millis(10)), 0);
        assert_eq!(game_loop.advance(Duration::from_millis(10)), 1);
        assert_eq!(game_loop.update_count(), 1);
        // 3.3 ms carried over, not enough for another step
        assert_eq!(game_loop.advance(Duration::from_millis(10)), 0);
    }

    #[test]
    fn test_one_step_per_vsync_frame() {
        let mut game_loop = GameLoop::new();
        let total: u32 = (0..60)
            .map(|_| game_loop.advance(FIXED_TIMESTEP_DURATION))
            .sum();
        assert_eq!(total, 60);
        assert_eq!(game_loop.frame_count(), 60);
    }

    #[test]
    fn test_max_physics_steps_limit() {
        let mut game_loop = GameLoop::new();

        // 300ms would allow 18 updates
        assert_eq!(game_loop.advance(Duration::from_millis(300)), MAX_PHYSICS_STEPS);
        // Backlog is dropped, not replayed
        assert_eq!(game_loop.advance(Duration::ZERO), 0);
    }

    #[test]
    fn test_paused_no_updates() {
        let mut game_loop = GameLoop::new();
        game_loop.pause();

        assert_eq!(game_loop.advance(Duration::from_millis(50)), 0);
        assert_eq!(game_loop.frame_count(), 1);
    }

    #[test]
    fn test_resume_drops_accumulated_time() {
        let mut game_loop = GameLoop::new();
        game_loop.advance(Duration::from_millis(15));
        game_loop.toggle_pause();
        assert!(game_loop.is_paused());

        game_loop.toggle_pause();
        assert!(!game_loop.is_paused());
        assert_eq!(game_loop.advance(Duration::from_millis(10)), 0);
    }

    #[test]
    fn test_fps_average() {
        let mut game_loop = GameLoop::new();
        for _ in 0..10 {
            game_loop.advance(Duration::from_millis(20));
        }
        assert_relative_eq!(game_loop.fps(), 50.0, epsilon = 0.01);
    }
}
