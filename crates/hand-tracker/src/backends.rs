//! Frame source and detector backends.
//!
//! The live camera and the pretrained landmark model sit outside this
//! workspace; anything that implements [`FrameSource`] and
//! [`LandmarkProvider`] plugs into the tracker. What ships here is trace
//! replay: a recorded landmark trace acts as both the camera and the
//! detector, which is how sessions are reproduced and tested offline.

use std::collections::VecDeque;
use std::path::Path;
use std::time::{Duration, Instant};

use handmouse_common::error::{HandmouseError, HandmouseResult};
use handmouse_hand_model::trace::{parse_trace, Trace};
use handmouse_hand_model::KeypointSet;
use handmouse_platform_core::{CapturedFrame, FrameSource, LandmarkProvider};

/// A frame from a trace: frame geometry plus the recorded detections.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayFrame {
    pub width: u32,
    pub height: u32,
    pub timestamp: Option<Duration>,
    pub hands: Vec<KeypointSet>,
}

impl CapturedFrame for ReplayFrame {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn timestamp(&self) -> Option<Duration> {
        self.timestamp
    }
}

/// Yields the frames of a recorded trace in order.
pub struct TraceSource {
    frames: VecDeque<ReplayFrame>,
    name: String,
    realtime: bool,
    started: Option<Instant>,
}

impl TraceSource {
    /// Build a source from a parsed trace.
    pub fn new(trace: Trace) -> Self {
        let width = trace.header.frame_width;
        let height = trace.header.frame_height;
        let frames = trace
            .frames
            .into_iter()
            .map(|frame| ReplayFrame {
                width,
                height,
                timestamp: frame.timestamp_ns.map(Duration::from_nanos),
                hands: frame.keypoint_sets(),
            })
            .collect();

        Self {
            frames,
            name: "trace".to_string(),
            realtime: false,
            started: None,
        }
    }

    /// Read and parse a trace file.
    pub fn from_path(path: &Path) -> HandmouseResult<Self> {
        if !path.exists() {
            return Err(HandmouseError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let trace = parse_trace(&content)
            .map_err(|e| HandmouseError::capture(format!("{}: {e}", path.display())))?;

        let mut source = Self::new(trace);
        source.name = format!("trace:{}", path.display());
        Ok(source)
    }

    /// Pace frames by their timestamps instead of replaying as fast as possible.
    pub fn realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    /// Frames not yet captured.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    fn wait_for(&mut self, timestamp: Duration) {
        let started = *self.started.get_or_insert_with(Instant::now);
        let due = started + timestamp;
        let now = Instant::now();
        if due > now {
            std::thread::sleep(due - now);
        }
    }
}

impl FrameSource for TraceSource {
    type Frame = ReplayFrame;

    fn capture_frame(&mut self) -> HandmouseResult<Option<ReplayFrame>> {
        let Some(frame) = self.frames.pop_front() else {
            return Ok(None);
        };
        if self.realtime {
            if let Some(timestamp) = frame.timestamp {
                self.wait_for(timestamp);
            }
        }
        Ok(Some(frame))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Reports the detections recorded in a [`ReplayFrame`].
#[derive(Debug, Default)]
pub struct ReplayDetector;

impl LandmarkProvider for ReplayDetector {
    type Frame = ReplayFrame;

    /// A recorded hand with no keypoints at all is malformed detector output.
    fn detect(&mut self, frame: &ReplayFrame) -> HandmouseResult<Vec<KeypointSet>> {
        if let Some(i) = frame.hands.iter().position(KeypointSet::is_empty) {
            return Err(HandmouseError::detection(format!("hand {i} has no keypoints")));
        }
        Ok(frame.hands.clone())
    }

    fn name(&self) -> &str {
        "replay"
    }
}
