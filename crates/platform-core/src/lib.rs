//! Handmouse platform core contracts.
//!
//! The pipeline talks to three external capabilities: something that
//! produces video frames, a pretrained detector that turns a frame into hand
//! keypoints, and an OS-level pointer actuator. This crate defines them as
//! traits so the per-frame loop can run against real devices, recorded
//! traces, or test doubles alike.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use handmouse_common::error::HandmouseResult;
use handmouse_hand_model::KeypointSet;

/// Size of the target display in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: u32,
    pub height: u32,
}

impl DisplaySize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are non-zero.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for DisplaySize {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

/// A frame handed from a [`FrameSource`] to a [`LandmarkProvider`].
pub trait CapturedFrame {
    /// Frame width in pixels.
    fn width(&self) -> u32;

    /// Frame height in pixels.
    fn height(&self) -> u32;

    /// Capture time relative to session start, if the source knows it.
    fn timestamp(&self) -> Option<Duration> {
        None
    }
}

/// Produces frames, one per loop iteration.
pub trait FrameSource {
    type Frame: CapturedFrame;

    /// Capture the next frame.
    ///
    /// `Ok(None)` means the stream ended. Errors are fatal for the session.
    fn capture_frame(&mut self) -> HandmouseResult<Option<Self::Frame>>;

    /// Source name for logging.
    fn name(&self) -> &str;
}

/// Turns a frame into zero or more hands of keypoints in frame pixels.
pub trait LandmarkProvider {
    type Frame: CapturedFrame;

    fn detect(&mut self, frame: &Self::Frame) -> HandmouseResult<Vec<KeypointSet>>;

    /// Provider name for logging.
    fn name(&self) -> &str;
}

/// OS-level pointer, button, and scroll control.
pub trait Actuator {
    fn move_to(&mut self, x: f64, y: f64) -> HandmouseResult<()>;

    fn click(&mut self) -> HandmouseResult<()>;

    fn double_click(&mut self) -> HandmouseResult<()>;

    fn right_click(&mut self) -> HandmouseResult<()>;

    fn mouse_down(&mut self) -> HandmouseResult<()>;

    fn mouse_up(&mut self) -> HandmouseResult<()>;

    /// Vertical scroll; positive scrolls up.
    fn scroll(&mut self, amount: i32) -> HandmouseResult<()>;

    /// Block the calling thread.
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }

    /// Size of the display the cursor moves on.
    fn display_size(&self) -> HandmouseResult<DisplaySize>;

    /// Actuator name for logging.
    fn name(&self) -> &str;
}

/// Polled once per frame; `true` ends the loop after the current frame.
pub trait ExitSignal {
    fn exit_requested(&self) -> bool;
}

impl ExitSignal for AtomicBool {
    fn exit_requested(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: ExitSignal + ?Sized> ExitSignal for Arc<T> {
    fn exit_requested(&self) -> bool {
        (**self).exit_requested()
    }
}

/// An exit signal that never fires; the loop runs until the source ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverExit;

impl ExitSignal for NeverExit {
    fn exit_requested(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_size_validity() {
        assert!(DisplaySize::default().is_valid());
        assert!(!DisplaySize::new(0, 1080).is_valid());
    }

    #[test]
    fn atomic_flag_is_an_exit_signal() {
        let flag = Arc::new(AtomicBool::new(false));
        assert!(!flag.exit_requested());
        flag.store(true, Ordering::SeqCst);
        assert!(flag.exit_requested());
        assert!(!NeverExit.exit_requested());
    }
}
