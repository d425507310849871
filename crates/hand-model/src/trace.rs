//! Landmark trace format.
//!
//! A trace is a recorded sequence of detector output that can be replayed
//! through the pipeline without a camera. It is JSONL: a `# {header}`
//! comment line carrying the frame size, then one object per frame.
//!
//! ```text
//! # {"schema_version":"1.0","frame_width":640,"frame_height":480}
//! {"t":0,"hands":[[[320,240],[330,230],null,...]]}
//! {"t":33000000,"hands":[]}
//! ```
//!
//! Each hand lists keypoints in id order; `null` marks a keypoint the
//! detector did not report.

use serde::{Deserialize, Serialize};

use crate::landmark::{KeypointSet, Point2D};

pub const TRACE_SCHEMA_VERSION: &str = "1.0";

/// Errors raised while reading a trace.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("trace is missing its '# {{header}}' line")]
    MissingHeader,

    #[error("invalid trace header: {0}")]
    Header(#[source] serde_json::Error),

    #[error("invalid frame on line {line}: {source}")]
    Frame {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("trace frame size must be non-zero, got {width}x{height}")]
    EmptyFrameSize { width: u32, height: u32 },
}

/// Metadata line at the top of a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceHeader {
    pub schema_version: String,
    /// Frame size in pixels that keypoints are expressed in.
    pub frame_width: u32,
    pub frame_height: u32,
}

/// Detector output for a single frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TraceFrame {
    /// Nanoseconds since trace start. Frames without one use the live clock.
    #[serde(rename = "t", default, skip_serializing_if = "Option::is_none")]
    pub timestamp_ns: Option<u64>,

    /// Zero or more hands, each up to 21 `[x, y]` pixel pairs in id order.
    #[serde(default)]
    pub hands: Vec<Vec<Option<[f64; 2]>>>,
}

impl TraceFrame {
    /// Frame with a single hand.
    pub fn with_hand(timestamp_ns: u64, keypoints: &KeypointSet) -> Self {
        let hand = keypoints
            .slots()
            .iter()
            .map(|slot| slot.map(|p| [p.x, p.y]))
            .collect();
        Self {
            timestamp_ns: Some(timestamp_ns),
            hands: vec![hand],
        }
    }

    /// Frame with no hand in view.
    pub fn empty(timestamp_ns: u64) -> Self {
        Self {
            timestamp_ns: Some(timestamp_ns),
            hands: vec![],
        }
    }

    /// Hands as keypoint sets.
    pub fn keypoint_sets(&self) -> Vec<KeypointSet> {
        self.hands
            .iter()
            .map(|hand| {
                KeypointSet::from_slots(
                    hand.iter()
                        .map(|slot| slot.map(|[x, y]| Point2D::new(x, y))),
                )
            })
            .collect()
    }
}

/// A parsed trace.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub header: TraceHeader,
    pub frames: Vec<TraceFrame>,
}

/// Parse a trace from JSONL content.
///
/// The first `#` line is the header; later `#` lines and blank lines are
/// ignored.
pub fn parse_trace(jsonl: &str) -> Result<Trace, TraceError> {
    let mut header = None;
    let mut frames = Vec::new();

    for (idx, line) in jsonl.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(comment) = line.strip_prefix('#') {
            if header.is_none() {
                let parsed: TraceHeader =
                    serde_json::from_str(comment.trim()).map_err(TraceError::Header)?;
                header = Some(parsed);
            }
            continue;
        }
        let frame = serde_json::from_str(line).map_err(|source| TraceError::Frame {
            line: idx + 1,
            source,
        })?;
        frames.push(frame);
    }

    let header = header.ok_or(TraceError::MissingHeader)?;
    if header.frame_width == 0 || header.frame_height == 0 {
        return Err(TraceError::EmptyFrameSize {
            width: header.frame_width,
            height: header.frame_height,
        });
    }
    Ok(Trace { header, frames })
}

/// Serialize a trace to JSONL.
pub fn serialize_trace(trace: &Trace) -> Result<String, serde_json::Error> {
    let mut output = format!("# {}\n", serde_json::to_string(&trace.header)?);
    for frame in &trace.frames {
        output.push_str(&serde_json::to_string(frame)?);
        output.push('\n');
    }
    Ok(output)
}
