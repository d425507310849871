//! Clock and timing utilities for the per-frame loop.
//!
//! Gesture timing (the double-click window) is measured against a monotonic
//! epoch recorded when a tracking session starts. Frames that carry their own
//! timestamps (trace replay) bypass the clock entirely.

use std::time::{Duration, Instant};

/// A session clock that provides monotonic timestamps relative to
/// a fixed epoch (the moment tracking started).
#[derive(Debug, Clone)]
pub struct SessionClock {
    /// The instant tracking started.
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl SessionClock {
    /// Create a new session clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Time elapsed since the session started.
    pub fn elapsed(&self) -> Duration {
        self.epoch.elapsed()
    }

    /// Wall-clock time at session start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }
}

/// Rolling frame-rate measurement, reported once per window.
#[derive(Debug)]
pub struct FrameRateMeter {
    window: Duration,
    window_start: Option<Duration>,
    frames_in_window: u32,
}

impl FrameRateMeter {
    /// Create a meter that reports once every `window`.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            window_start: None,
            frames_in_window: 0,
        }
    }

    /// Record a frame at `now`. Returns the measured FPS when a window closes.
    pub fn tick(&mut self, now: Duration) -> Option<f64> {
        let start = *self.window_start.get_or_insert(now);
        self.frames_in_window += 1;

        let span = now.saturating_sub(start);
        if span < self.window || span.is_zero() {
            return None;
        }

        let fps = self.frames_in_window as f64 / span.as_secs_f64();
        self.window_start = Some(now);
        self.frames_in_window = 0;
        Some(fps)
    }
}
