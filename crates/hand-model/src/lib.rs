//! Handmouse Hand Model
//!
//! Plain data shared by every stage of the per-frame pipeline:
//! - **Landmarks:** the 21-point hand skeleton and per-frame keypoint sets
//! - **Actions:** pointer commands produced by cursor smoothing and gestures
//! - **Traces:** recorded landmark sequences in JSONL form for replay
//!
//! Nothing in here performs I/O beyond (de)serialization.

pub mod action;
pub mod landmark;
pub mod trace;

pub use action::GestureAction;
pub use landmark::{HandDetection, HandLandmark, KeypointSet, Point2D, HAND_CONNECTIONS};
