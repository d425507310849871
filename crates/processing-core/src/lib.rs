//! Handmouse Processing Core
//!
//! Turns per-frame hand keypoints into pointer actions:
//! - **Mapping:** rescale keypoints from frame pixels to display units
//! - **Cursor Smoothing:** damp fingertip jitter, then amplify net motion
//! - **Gestures:** pinch, drag, right-click, and thumbs-up/down scroll
//!
//! This crate is pure computation with no I/O and no platform dependencies.
//! State that survives between frames is owned by the caller and passed in.

pub mod cursor_smooth;
pub mod gesture;
pub mod instructions;
pub mod mapper;

pub use cursor_smooth::{CursorSmoother, CursorState};
pub use gesture::{GestureClassifier, GestureState};
pub use mapper::CoordinateMapper;
