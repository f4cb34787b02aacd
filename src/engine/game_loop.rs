// Fixed-timestep driver
//
// The simulation always ticks with `FIXED_TIMESTEP`, so spawn timers,
// recovery countdowns and animation events come out the same at any frame
// rate. Rendering happens once per frame with the real frame time.

use std::time::{Duration, Instant};

/// Simulation rate (60 ticks per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667);

/// Most ticks run for one frame; anything beyond is dropped
pub const MAX_STEPS_PER_FRAME: u32 = 5;

/// Turns wall-clock frames into a whole number of simulation ticks
pub struct GameLoop {
    /// Frame time not yet spent on ticks
    accumulator: Duration,
    last_frame: Instant,
    paused: bool,
    tick_count: u64,
    /// Length of the last frame, for rendering
    frame_delta: f32,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame: Instant::now(),
            paused: false,
            tick_count: 0,
            frame_delta: 0.0,
        }
    }

    /// Start a frame from the wall clock; returns how many ticks to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.advance(frame_time)
    }

    /// Account for a frame of `frame_time`; returns how many ticks to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_delta = frame_time.as_secs_f32();
        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;
        let mut ticks = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && ticks < MAX_STEPS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            ticks += 1;
        }
        if ticks == MAX_STEPS_PER_FRAME {
            self.accumulator = self.accumulator.min(FIXED_TIMESTEP_DURATION);
        }

        self.tick_count += u64::from(ticks);
        ticks
    }

    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Seconds since the previous frame
    pub fn render_delta_time(&self) -> f32 {
        self.frame_delta
    }

    /// Ticks run since the loop started
    pub fn tick_count(&self) -> u64 {
        self.tick_count
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

    /// Resume without replaying the time spent paused
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.accumulator = Duration::ZERO;
            self.last_frame = Instant::now();
            log::info!("Game resumed");
        }
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

    #[test]
    fn test_new_loop_is_idle() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.tick_count(), 0);
        assert!(!game_loop.is_paused());
        assert!((game_loop.fixed_timestep() - 1.0 / 60.0).abs() < 0.0001);
    }

    #[test]
    fn test_one_frame_one_tick() {
        let mut game_loop = GameLoop::new();
        assert_eq!(game_loop.advance(Duration::from_micros(16_667)), 1);
        assert_eq!(game_loop.tick_count(), 1);
        assert!((game_loop.render_delta_time() - 0.016_667).abs() < 1e-6);
    }

    #[test]
    fn test_short_frames_accumulate() {
        let mut game_loop = GameLoop::new();
        assert_eq!(game_loop.advance(Duration::from_millis(10)), 0);
        assert_eq!(game_loop.advance(Duration::from_millis(10)), 1);
    }

    #[test]
    fn test_long_frame_capped_and_backlog_dropped() {
        let mut game_loop = GameLoop::new();
        // 300ms would be 18 ticks
        assert_eq!(
            game_loop.advance(Duration::from_millis(300)),
            MAX_STEPS_PER_FRAME
        );
        assert!(game_loop.advance(Duration::ZERO) <= 1);
    }

    #[test]
    fn test_paused_frames_run_no_ticks() {
        let mut game_loop = GameLoop::new();
        game_loop.pause();
        assert_eq!(game_loop.advance(Duration::from_millis(50)), 0);
        assert_eq!(game_loop.tick_count(), 0);

        game_loop.resume();
        assert!(!game_loop.is_paused());
        assert_eq!(game_loop.advance(Duration::from_micros(16_667)), 1);
    }
}
