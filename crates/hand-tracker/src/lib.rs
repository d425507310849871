//! Handmouse Hand Tracker
//!
//! Runs the per-frame loop that turns a hand in front of the camera into
//! pointer input:
//!
//! capture → detect → map → smooth cursor → classify gestures → actuate
//!
//! The loop is single-threaded and synchronous. One frame is fully handled
//! before the next is captured, and the only blocking points are the
//! capture call itself and the pause that follows a right click. Capture,
//! detection, and actuation are pluggable backends:
//!
//! - **Trace replay:** recorded landmark traces stand in for camera + detector
//! - **Logging / recording actuators:** dry runs and tests
//! - **OS actuator:** real pointer control (`enigo` feature)

pub mod actuators;
pub mod backends;

use std::time::Duration;

use serde::Serialize;

use handmouse_common::clock::{FrameRateMeter, SessionClock};
use handmouse_common::config::AppConfig;
use handmouse_common::error::HandmouseResult;
use handmouse_hand_model::{GestureAction, HandDetection, HandLandmark};
use handmouse_platform_core::{
    Actuator, CapturedFrame, DisplaySize, ExitSignal, FrameSource, LandmarkProvider,
};
use handmouse_processing_core::{
    CoordinateMapper, CursorSmoother, CursorState, GestureClassifier, GestureState,
};

/// Counters reported when the loop ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrackerStats {
    /// Frames captured and processed.
    pub frames: u64,
    /// Frames in which a hand was detected.
    pub frames_with_hand: u64,
    /// Gesture actions dispatched, cursor moves excluded.
    pub gestures: u64,
    /// Frames the detector failed on, handled as frames without a hand.
    pub detection_errors: u64,
    /// Actuator calls that failed.
    pub actuator_errors: u64,
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The user asked to quit.
    ExitRequested,
    /// The frame source has no more frames.
    SourceExhausted,
}

/// The tracker that coordinates a frame source, a detector, and an actuator.
pub struct HandTracker<S, D, A>
where
    S: FrameSource,
    D: LandmarkProvider<Frame = S::Frame>,
    A: Actuator,
{
    source: S,
    detector: D,
    actuator: A,
    display: DisplaySize,
    mapper: Option<CoordinateMapper>,
    smoother: CursorSmoother,
    classifier: GestureClassifier,
    cursor: CursorState,
    gestures: GestureState,
    clock: SessionClock,
    fps: FrameRateMeter,
    stats: TrackerStats,
}

impl<S, D, A> HandTracker<S, D, A>
where
    S: FrameSource,
    D: LandmarkProvider<Frame = S::Frame>,
    A: Actuator,
{
    /// Create a new tracker.
    ///
    /// The display size comes from the config when both dimensions are set,
    /// otherwise from the actuator.
    pub fn new(source: S, detector: D, actuator: A, config: &AppConfig) -> HandmouseResult<Self> {
        config.validate()?;

        let display = match (config.tracking.display_width, config.tracking.display_height) {
            (Some(width), Some(height)) => DisplaySize::new(width, height),
            _ => actuator.display_size()?,
        };

        Ok(Self {
            source,
            detector,
            actuator,
            display,
            mapper: None,
            smoother: CursorSmoother::from_config(&config.tracking)?,
            classifier: GestureClassifier::new(&config.gestures),
            cursor: CursorState::default(),
            gestures: GestureState::default(),
            clock: SessionClock::start(),
            fps: FrameRateMeter::new(Duration::from_secs(5)),
            stats: TrackerStats::default(),
        })
    }

    /// Run the loop until the source ends or `exit` fires.
    ///
    /// A capture or detection failure ends the loop with an error; there are
    /// no retries.
    pub fn run(&mut self, exit: &impl ExitSignal) -> HandmouseResult<StopReason> {
        tracing::info!(
            source = %self.source.name(),
            detector = %self.detector.name(),
            actuator = %self.actuator.name(),
            display_width = self.display.width,
            display_height = self.display.height,
            started_at = %self.clock.epoch_wall(),
            "Hand tracker started"
        );

        let reason = loop {
            let frame = match self.source.capture_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => break StopReason::SourceExhausted,
                Err(e) => {
                    tracing::error!(error = %e, frames = self.stats.frames, "Frame capture failed");
                    return Err(e);
                }
            };

            self.process_frame(&frame)?;

            if exit.exit_requested() {
                break StopReason::ExitRequested;
            }
        };

        tracing::info!(
            reason = ?reason,
            frames = self.stats.frames,
            frames_with_hand = self.stats.frames_with_hand,
            gestures = self.stats.gestures,
            "Hand tracker stopped"
        );
        Ok(reason)
    }

    /// Process one frame and return the actions that were dispatched.
    ///
    /// Frames without a hand leave cursor and gesture state untouched, and so
    /// do frames the detector fails on.
    pub fn process_frame(&mut self, frame: &S::Frame) -> HandmouseResult<Vec<GestureAction>> {
        let now = frame.timestamp().unwrap_or_else(|| self.clock.elapsed());
        self.stats.frames += 1;
        if let Some(fps) = self.fps.tick(now) {
            tracing::debug!(fps, "Frame rate");
        }

        let hands = match self.detector.detect(frame) {
            Ok(hands) => hands,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                self.stats.detection_errors += 1;
                tracing::warn!(error = %e, frame = self.stats.frames, "Detection failed");
                return Ok(Vec::new());
            }
        };
        let keypoints = match HandDetection::first_of(hands) {
            HandDetection::Absent => {
                tracing::trace!(frame = self.stats.frames, "No hand detected");
                return Ok(Vec::new());
            }
            HandDetection::Present(keypoints) => keypoints,
        };
        self.stats.frames_with_hand += 1;

        let mapped = self
            .mapper_for(frame.width(), frame.height())?
            .map_keypoints(&keypoints);

        let mut actions = Vec::new();
        if let Some(index_tip) = mapped.get(HandLandmark::IndexTip) {
            let pos = self.smoother.step(&mut self.cursor, index_tip);
            actions.push(GestureAction::MoveTo { x: pos.x, y: pos.y });
        }
        actions.extend(self.classifier.classify(&mut self.gestures, &mapped, now));

        for action in &actions {
            self.dispatch(action)?;
        }
        Ok(actions)
    }

    /// The mapper for the current frame size, rebuilt if the size changed.
    fn mapper_for(&mut self, width: u32, height: u32) -> HandmouseResult<CoordinateMapper> {
        match self.mapper {
            Some(mapper) if mapper.matches_frame(width, height) => Ok(mapper),
            _ => {
                let mapper = CoordinateMapper::new(width, height, self.display)?;
                tracing::debug!(width, height, "Frame size set");
                self.mapper = Some(mapper);
                Ok(mapper)
            }
        }
    }

    /// Send one action to the actuator. Actuator failures are logged and
    /// counted; any other error ends the loop.
    fn dispatch(&mut self, action: &GestureAction) -> HandmouseResult<()> {
        if !matches!(action, GestureAction::MoveTo { .. }) {
            self.stats.gestures += 1;
            tracing::debug!(action = action.name(), "Gesture");
        }

        let result = match *action {
            GestureAction::MoveTo { x, y } => self.actuator.move_to(x, y),
            GestureAction::Click => self.actuator.click(),
            GestureAction::DoubleClick => self.actuator.double_click(),
            GestureAction::RightClick => self.actuator.right_click(),
            GestureAction::MouseDown => self.actuator.mouse_down(),
            GestureAction::MouseUp => self.actuator.mouse_up(),
            GestureAction::Scroll { amount } => self.actuator.scroll(amount),
            GestureAction::Pause { duration } => {
                self.actuator.sleep(duration);
                Ok(())
            }
        };

        match result {
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                self.stats.actuator_errors += 1;
                tracing::warn!(error = %e, action = action.name(), "Actuator error");
                Ok(())
            }
            Ok(()) => Ok(()),
        }
    }

    pub fn stats(&self) -> TrackerStats {
        self.stats
    }

    pub fn cursor_state(&self) -> CursorState {
        self.cursor
    }

    pub fn gesture_state(&self) -> GestureState {
        self.gestures
    }

    pub fn display(&self) -> DisplaySize {
        self.display
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }
}
