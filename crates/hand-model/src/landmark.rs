//! Hand landmark types.
//!
//! A detected hand is described by 21 keypoints with fixed anatomical
//! meaning. Keypoint sets live for a single frame; nothing here carries
//! identity from one frame to the next.

use serde::{Deserialize, Serialize};

/// Number of keypoints in the hand skeleton.
pub const LANDMARK_COUNT: usize = 21;

/// A 2D point. Units depend on context: frame pixels before mapping,
/// display units after.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Absolute vertical separation between two points.
    pub fn vertical_distance(&self, other: &Point2D) -> f64 {
        (self.y - other.y).abs()
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// The 21 keypoints of the hand skeleton, numbered wrist-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum HandLandmark {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexMcp = 5,
    IndexPip = 6,
    IndexDip = 7,
    IndexTip = 8,
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,
    RingMcp = 13,
    RingPip = 14,
    RingDip = 15,
    RingTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl HandLandmark {
    /// All landmarks in id order.
    pub const ALL: [HandLandmark; LANDMARK_COUNT] = [
        Self::Wrist,
        Self::ThumbCmc,
        Self::ThumbMcp,
        Self::ThumbIp,
        Self::ThumbTip,
        Self::IndexMcp,
        Self::IndexPip,
        Self::IndexDip,
        Self::IndexTip,
        Self::MiddleMcp,
        Self::MiddlePip,
        Self::MiddleDip,
        Self::MiddleTip,
        Self::RingMcp,
        Self::RingPip,
        Self::RingDip,
        Self::RingTip,
        Self::PinkyMcp,
        Self::PinkyPip,
        Self::PinkyDip,
        Self::PinkyTip,
    ];

    /// Fingertips of the four non-thumb fingers.
    pub const FINGER_TIPS: [HandLandmark; 4] = [
        Self::IndexTip,
        Self::MiddleTip,
        Self::RingTip,
        Self::PinkyTip,
    ];

    /// Numeric id (0-20).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a landmark by numeric id.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Whether this landmark is the tip of a digit (thumb included).
    pub fn is_tip(self) -> bool {
        matches!(
            self,
            Self::ThumbTip | Self::IndexTip | Self::MiddleTip | Self::RingTip | Self::PinkyTip
        )
    }

    /// The knuckle two ids below a tip, used to decide whether the digit is
    /// extended. `None` for non-tip landmarks.
    pub fn knuckle(self) -> Option<Self> {
        if self.is_tip() {
            Self::from_index(self.index() - 2)
        } else {
            None
        }
    }
}

/// Skeleton edges for overlay rendering.
pub const HAND_CONNECTIONS: [(HandLandmark, HandLandmark); 21] = {
    use HandLandmark::*;
    [
        (Wrist, ThumbCmc),
        (ThumbCmc, ThumbMcp),
        (ThumbMcp, ThumbIp),
        (ThumbIp, ThumbTip),
        (Wrist, IndexMcp),
        (IndexMcp, IndexPip),
        (IndexPip, IndexDip),
        (IndexDip, IndexTip),
        (IndexMcp, MiddleMcp),
        (MiddleMcp, MiddlePip),
        (MiddlePip, MiddleDip),
        (MiddleDip, MiddleTip),
        (MiddleMcp, RingMcp),
        (RingMcp, RingPip),
        (RingPip, RingDip),
        (RingDip, RingTip),
        (RingMcp, PinkyMcp),
        (Wrist, PinkyMcp),
        (PinkyMcp, PinkyPip),
        (PinkyPip, PinkyDip),
        (PinkyDip, PinkyTip),
    ]
};

/// Keypoint positions for one detected hand in one frame.
///
/// Detectors may drop keypoints on partial detections, so every slot is
/// optional.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KeypointSet {
    points: [Option<Point2D>; LANDMARK_COUNT],
}

impl KeypointSet {
    /// An empty set with no keypoints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from positions in id order. Extra points beyond 21 are ignored.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point2D>,
    {
        let mut set = Self::new();
        for (slot, point) in set.points.iter_mut().zip(points) {
            *slot = Some(point);
        }
        set
    }

    /// Build from per-id slots; `None` marks a keypoint the detector dropped.
    pub fn from_slots<I>(slots: I) -> Self
    where
        I: IntoIterator<Item = Option<Point2D>>,
    {
        let mut set = Self::new();
        for (slot, point) in set.points.iter_mut().zip(slots) {
            *slot = point;
        }
        set
    }

    /// Per-id slots in id order.
    pub fn slots(&self) -> [Option<Point2D>; LANDMARK_COUNT] {
        self.points
    }

    /// Build from detector output normalized to `[0.0, 1.0]`, converting to
    /// whole frame pixels (truncated toward zero).
    pub fn from_normalized<I>(points: I, frame_width: u32, frame_height: u32) -> Self
    where
        I: IntoIterator<Item = Point2D>,
    {
        let w = frame_width as f64;
        let h = frame_height as f64;
        Self::from_points(
            points
                .into_iter()
                .map(|p| Point2D::new((p.x * w).trunc(), (p.y * h).trunc())),
        )
    }

    /// Position of a landmark, if it was detected.
    pub fn get(&self, landmark: HandLandmark) -> Option<Point2D> {
        self.points[landmark.index()]
    }

    /// Set or replace a landmark position.
    pub fn insert(&mut self, landmark: HandLandmark, point: Point2D) {
        self.points[landmark.index()] = Some(point);
    }

    /// Drop a landmark from the set.
    pub fn remove(&mut self, landmark: HandLandmark) -> Option<Point2D> {
        self.points[landmark.index()].take()
    }

    /// Number of landmarks present.
    pub fn len(&self) -> usize {
        self.points.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.points.iter().all(Option::is_none)
    }

    /// Whether all 21 landmarks are present.
    pub fn is_complete(&self) -> bool {
        self.points.iter().all(Option::is_some)
    }

    /// Apply `f` to every present position, keeping gaps as gaps.
    pub fn map_points<F>(&self, mut f: F) -> Self
    where
        F: FnMut(Point2D) -> Point2D,
    {
        let mut out = Self::new();
        for (dst, src) in out.points.iter_mut().zip(self.points.iter()) {
            *dst = src.map(&mut f);
        }
        out
    }

    /// Whether a fingertip sits above (smaller y than) its knuckle.
    ///
    /// `None` when the landmark is not a tip or either point is missing.
    pub fn is_extended(&self, tip: HandLandmark) -> Option<bool> {
        let knuckle = tip.knuckle()?;
        let tip_pos = self.get(tip)?;
        let knuckle_pos = self.get(knuckle)?;
        Some(tip_pos.y < knuckle_pos.y)
    }
}

/// Result of hand detection for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HandDetection {
    /// No hand in view.
    #[default]
    Absent,
    /// A hand was found; positions are in frame pixels.
    Present(KeypointSet),
}

impl HandDetection {
    /// Pick the first reported hand, if any.
    pub fn first_of(hands: Vec<KeypointSet>) -> Self {
        hands
            .into_iter()
            .next()
            .map_or(Self::Absent, Self::Present)
    }

    pub fn keypoints(&self) -> Option<&KeypointSet> {
        match self {
            Self::Absent => None,
            Self::Present(set) => Some(set),
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}
