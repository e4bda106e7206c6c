//! Frame timing for the presentation loop.
//!
//! The simulation itself is tick-based and never reads the clock; one tick
//! is one display refresh. [`FrameClock`] exists for the host: it counts
//! frames, measures the gap between them and keeps a smoothed FPS figure.
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//! // once per redraw
//! if clock.update() {
//!     log::debug!("{:.1} fps", clock.fps());
//! }
//! ```

use std::time::{Duration, Instant};

/// Frame counter with FPS estimate.
#[derive(Debug)]
pub struct FrameClock {
    last_frame: Instant,
    delta: Duration,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    paused: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta: Duration::ZERO,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
        }
    }

    /// Record a frame. Returns `true` when the FPS estimate was refreshed.
    pub fn update(&mut self) -> bool {
        let now = Instant::now();
        if self.paused {
            self.delta = Duration::ZERO;
            return false;
        }

        self.delta = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_count += 1;

        let window = now.duration_since(self.fps_update_time);
        if window >= self.fps_update_interval {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / window.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
            return true;
        }
        false
    }

    /// Frames recorded since creation.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Time between the last two frames.
    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop counting frames, e.g. while the window is minimized.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume counting without reporting the paused gap as a frame delta.
    pub fn resume(&mut self) {
        if self.paused {
            let now = Instant::now();
            self.last_frame = now;
            self.fps_update_time = now;
            self.fps_frame_count = self.frame_count;
            self.paused = false;
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_counts_frames() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        thread::sleep(Duration::from_millis(5));
        clock.update();
        assert_eq!(clock.frame(), 1);
        assert!(clock.delta() >= Duration::from_millis(5));
    }

    #[test]
    fn test_fps_refreshes_after_interval() {
        let mut clock = FrameClock::new();
        clock.update();
        thread::sleep(Duration::from_millis(520));
        assert!(clock.update());
        assert!(clock.fps() > 0.0 && clock.fps() < 10.0);
    }

    #[test]
    fn test_pause_freezes_frames() {
        let mut clock = FrameClock::new();
        clock.update();
        clock.pause();
        thread::sleep(Duration::from_millis(10));
        assert!(!clock.update());
        assert_eq!(clock.frame(), 1);
        assert_eq!(clock.delta(), Duration::ZERO);

        clock.resume();
        clock.update();
        assert_eq!(clock.frame(), 2);
        assert!(clock.delta() < Duration::from_millis(10));
    }
}
