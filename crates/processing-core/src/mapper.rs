//! Frame-to-display coordinate mapping.
//!
//! The mapping is a plain linear rescale of the whole frame onto the whole
//! display. There is no clamping and no "active region" crop, so keypoints
//! near the frame edge may land outside the display; the cursor smoother's
//! amplification is what compensates for a small working area.

use handmouse_common::error::{HandmouseError, HandmouseResult};
use handmouse_hand_model::{KeypointSet, Point2D};
use handmouse_platform_core::DisplaySize;

/// Linear rescale from frame pixels to display units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    frame_width: f64,
    frame_height: f64,
    display_width: f64,
    display_height: f64,
}

impl CoordinateMapper {
    /// Build a mapper for the given frame size and display.
    ///
    /// Zero-sized frames or displays violate the caller's contract and are
    /// reported as a `Processing` error, which ends the session.
    pub fn new(frame_width: u32, frame_height: u32, display: DisplaySize) -> HandmouseResult<Self> {
        if frame_width == 0 || frame_height == 0 {
            return Err(HandmouseError::processing(format!(
                "frame size must be non-zero, got {frame_width}x{frame_height}"
            )));
        }
        if !display.is_valid() {
            return Err(HandmouseError::processing(format!(
                "display size must be non-zero, got {}x{}",
                display.width, display.height
            )));
        }
        Ok(Self {
            frame_width: frame_width as f64,
            frame_height: frame_height as f64,
            display_width: display.width as f64,
            display_height: display.height as f64,
        })
    }

    /// Whether this mapper was built for the given frame size.
    pub fn matches_frame(&self, frame_width: u32, frame_height: u32) -> bool {
        self.frame_width == frame_width as f64 && self.frame_height == frame_height as f64
    }

    /// Map a frame-pixel point to display units: `(Dw * x / W, Dh * y / H)`.
    pub fn map_point(&self, p: Point2D) -> Point2D {
        Point2D::new(
            self.display_width * p.x / self.frame_width,
            self.display_height * p.y / self.frame_height,
        )
    }

    /// Map a display point back to frame pixels.
    pub fn map_inverse(&self, p: Point2D) -> Point2D {
        Point2D::new(
            self.frame_width * p.x / self.display_width,
            self.frame_height * p.y / self.display_height,
        )
    }

    /// Map every keypoint of a hand. Missing keypoints stay missing.
    pub fn map_keypoints(&self, keypoints: &KeypointSet) -> KeypointSet {
        keypoints.map_points(|p| self.map_point(p))
    }
}
