//! Cursor motion smoothing.
//!
//! Each frame the cursor moves from its previous position `P` toward the
//! mapped index fingertip `T` in two stages:
//!
//! ```text
//! C  = P + (T - P) / k      exponential smoothing toward the target
//! C' = P + (C - P) * A      amplification of the smoothed displacement
//! ```
//!
//! The net per-frame gain is `A / k`, applied iteratively, so detector
//! jitter is damped while sustained motion still reaches the target over a
//! few frames. The two stages are kept as separate steps rather than folded
//! into a single gain so results match the reference tuning bit for bit.

use handmouse_common::config::TrackingConfig;
use handmouse_common::error::{HandmouseError, HandmouseResult};
use handmouse_hand_model::Point2D;

/// Previous smoothed cursor position, carried across frames.
///
/// Starts at the origin, so the first detected hand produces one large
/// corrective jump. It is never reset, including across frames where no
/// hand is visible.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorState {
    position: Point2D,
}

impl CursorState {
    /// State seeded at a known position.
    pub fn at(position: Point2D) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Point2D {
        self.position
    }
}

/// Cursor smoothing engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorSmoother {
    /// Smoothing constant `k`, strictly positive.
    smoothening: f64,
    /// Amplification factor `A`.
    amplification: f64,
}

impl CursorSmoother {
    /// Create a smoother. `smoothening` must be a positive finite number.
    pub fn new(smoothening: f64, amplification: f64) -> HandmouseResult<Self> {
        if !smoothening.is_finite() || smoothening <= 0.0 {
            return Err(HandmouseError::config(format!(
                "smoothening must be a positive number, got {smoothening}"
            )));
        }
        if !amplification.is_finite() {
            return Err(HandmouseError::config("amplification must be finite"));
        }
        Ok(Self {
            smoothening,
            amplification,
        })
    }

    /// Create a smoother with the default tuning (k = 7, A = 5).
    pub fn with_defaults() -> Self {
        let defaults = TrackingConfig::default();
        Self {
            smoothening: defaults.smoothening,
            amplification: defaults.amplification,
        }
    }

    pub fn from_config(config: &TrackingConfig) -> HandmouseResult<Self> {
        Self::new(config.smoothening, config.amplification)
    }

    pub fn smoothening(&self) -> f64 {
        self.smoothening
    }

    pub fn amplification(&self) -> f64 {
        self.amplification
    }

    /// Fraction of the gap to the target closed per frame.
    pub fn effective_gain(&self) -> f64 {
        self.amplification / self.smoothening
    }

    /// Advance the cursor toward `target`, update `state`, and return the
    /// new cursor position.
    pub fn step(&self, state: &mut CursorState, target: Point2D) -> Point2D {
        let prev = state.position;
        let next = Point2D::new(
            self.smooth_axis(prev.x, target.x),
            self.smooth_axis(prev.y, target.y),
        );
        state.position = next;
        next
    }

    fn smooth_axis(&self, prev: f64, target: f64) -> f64 {
        let smoothed = prev + (target - prev) / self.smoothening;
        prev + (smoothed - prev) * self.amplification
    }
}

impl Default for CursorSmoother {
    fn default() -> Self {
        Self::with_defaults()
    }
}
