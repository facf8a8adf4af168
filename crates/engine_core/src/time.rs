//! Time management for the frame loop.

use std::time::{Duration, Instant};

/// Longest frame delta the simulation will accept, in seconds. A window drag
/// or a debugger pause can stall redraws for whole seconds; feeding that
/// into locomotion would step the player through walls in one move.
const MAX_DELTA_SECONDS: f32 = 0.1;

/// Manages frame timing and delta time calculation.
#[derive(Debug)]
pub struct Time {
    /// Time when the app started.
    start_time: Instant,
    /// Time of the last frame.
    last_frame: Instant,
    /// Duration of the last frame.
    delta: Duration,
    /// Total elapsed time since start.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new time manager.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_frame: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Update timing at the start of a new frame.
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_frame;
        self.last_frame = now;
        self.elapsed = now - self.start_time;
        self.frame_count += 1;
    }

    /// Get the delta time in seconds, clamped to [`MAX_DELTA_SECONDS`].
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32().min(MAX_DELTA_SECONDS)
    }

    /// Get the raw (unclamped) delta time as a Duration.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get total elapsed time as Duration.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the current FPS (averaged over last frame).
    pub fn fps(&self) -> f32 {
        if self.delta.as_secs_f32() > 0.0 {
            1.0 / self.delta.as_secs_f32()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_starts_at_zero() {
        let time = Time::new();
        assert_eq!(time.delta_seconds(), 0.0);
        assert_eq!(time.frame_count(), 0);
    }

    #[test]
    fn update_advances_frame_count_and_elapsed() {
        let mut time = Time::new();
        std::thread::sleep(Duration::from_millis(2));
        time.update();
        assert_eq!(time.frame_count(), 1);
        assert!(time.elapsed_seconds() > 0.0);
        assert!(time.delta_seconds() > 0.0);
    }

    #[test]
    fn delta_is_clamped() {
        let mut time = Time::new();
        // Fake a long stall by rewinding last_frame.
        time.last_frame = Instant::now() - Duration::from_secs(3);
        time.update();
        assert!(time.delta_seconds() <= MAX_DELTA_SECONDS + f32::EPSILON);
        assert!(time.delta().as_secs_f32() > 1.0);
    }
}
