use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use handmouse_common::config::AppConfig;
use handmouse_common::error::{HandmouseError, HandmouseResult};
use handmouse_hand_model::trace::{Trace, TraceFrame, TraceHeader, TRACE_SCHEMA_VERSION};
use handmouse_hand_model::{GestureAction, HandLandmark, KeypointSet, Point2D};
use handmouse_hand_tracker::actuators::RecordingActuator;
use handmouse_hand_tracker::backends::{ReplayDetector, ReplayFrame, TraceSource};
use handmouse_hand_tracker::{HandTracker, StopReason};
use handmouse_platform_core::{Actuator, DisplaySize, FrameSource, NeverExit};

/// Frames are 640x480 and the display is 1280x960, so display distances are
/// twice the pixel distances.
const DISPLAY: DisplaySize = DisplaySize {
    width: 1280,
    height: 960,
};
const THUMB_Y: f64 = 250.0;

/// Open hand in frame pixels, every finger extended and far from the thumb.
fn open_hand() -> KeypointSet {
    let mut set = KeypointSet::new();
    set.insert(HandLandmark::Wrist, Point2D::new(320.0, 420.0));
    set.insert(HandLandmark::ThumbTip, Point2D::new(250.0, THUMB_Y));
    for tip in HandLandmark::FINGER_TIPS {
        set.insert(tip.knuckle().unwrap(), Point2D::new(320.0, 300.0));
        set.insert(tip, Point2D::new(320.0, 120.0));
    }
    set
}

fn with_tip_gap(tip: HandLandmark, gap_px: f64) -> KeypointSet {
    let mut set = open_hand();
    set.insert(tip, Point2D::new(330.0, THUMB_Y - gap_px));
    set
}

fn trace(frames: Vec<TraceFrame>) -> Trace {
    Trace {
        header: TraceHeader {
            schema_version: TRACE_SCHEMA_VERSION.to_string(),
            frame_width: 640,
            frame_height: 480,
        },
        frames,
    }
}

fn tracker(
    frames: Vec<TraceFrame>,
) -> HandTracker<TraceSource, ReplayDetector, RecordingActuator> {
    HandTracker::new(
        TraceSource::new(trace(frames)),
        ReplayDetector,
        RecordingActuator::new(DISPLAY),
        &AppConfig::default(),
    )
    .unwrap()
}

fn ms(v: u64) -> u64 {
    v * 1_000_000
}

#[test]
fn cursor_follows_index_tip_in_display_units() {
    let mut t = tracker(vec![TraceFrame::with_hand(0, &open_hand())]);
    assert_eq!(t.run(&NeverExit).unwrap(), StopReason::SourceExhausted);

    // Index tip (320, 120) px maps to (640, 240); first step from the origin
    // closes 5/7 of the gap.
    let (x, y) = t.actuator().last_position().unwrap();
    assert!((x - 640.0 * 5.0 / 7.0).abs() < 1e-9);
    assert!((y - 240.0 * 5.0 / 7.0).abs() < 1e-9);
    assert_eq!(t.cursor_state().position(), Point2D::new(x, y));
    assert!(t.actuator().gestures().is_empty());
}

#[test]
fn pinch_sequence_clicks_once() {
    // 40px = 80 display units (apart), 30px = 60 (pinched)
    let frames = vec![
        TraceFrame::with_hand(ms(0), &with_tip_gap(HandLandmark::IndexTip, 40.0)),
        TraceFrame::with_hand(ms(500), &with_tip_gap(HandLandmark::IndexTip, 30.0)),
        TraceFrame::with_hand(ms(1000), &with_tip_gap(HandLandmark::IndexTip, 40.0)),
    ];
    let mut t = tracker(frames);
    t.run(&NeverExit).unwrap();

    assert_eq!(t.actuator().gestures(), vec![GestureAction::Click]);
    let stats = t.stats();
    assert_eq!(stats.frames, 3);
    assert_eq!(stats.frames_with_hand, 3);
    assert_eq!(stats.gestures, 1);
}

#[test]
fn quick_second_pinch_double_clicks() {
    let frames = vec![
        TraceFrame::with_hand(ms(0), &with_tip_gap(HandLandmark::IndexTip, 10.0)),
        TraceFrame::with_hand(ms(100), &open_hand()),
        TraceFrame::with_hand(ms(200), &with_tip_gap(HandLandmark::IndexTip, 10.0)),
    ];
    let mut t = tracker(frames);
    t.run(&NeverExit).unwrap();
    assert_eq!(
        t.actuator().gestures(),
        vec![GestureAction::Click, GestureAction::DoubleClick]
    );
}

#[test]
fn drag_presses_and_releases_once() {
    // 45px = 90 units, 25px = 50 units
    let frames = [45.0, 25.0, 25.0, 45.0]
        .iter()
        .enumerate()
        .map(|(i, gap)| {
            TraceFrame::with_hand(ms(i as u64 * 33), &with_tip_gap(HandLandmark::RingTip, *gap))
        })
        .collect();
    let mut t = tracker(frames);
    t.run(&NeverExit).unwrap();
    assert_eq!(
        t.actuator().gestures(),
        vec![GestureAction::MouseDown, GestureAction::MouseUp]
    );
}

#[test]
fn right_click_requests_pause() {
    let frames = vec![TraceFrame::with_hand(
        0,
        &with_tip_gap(HandLandmark::MiddleTip, 5.0),
    )];
    let mut t = tracker(frames);
    t.run(&NeverExit).unwrap();

    // The move comes first, then the right click and its pause.
    let actions = t.actuator().actions();
    assert!(matches!(actions[0], GestureAction::MoveTo { .. }));
    assert_eq!(
        &actions[1..],
        &[
            GestureAction::RightClick,
            GestureAction::Pause {
                duration: Duration::from_secs(1)
            }
        ]
    );
}

#[test]
fn frames_without_hand_leave_state_untouched() {
    let mut replay = TraceSource::new(trace(vec![
        TraceFrame::with_hand(ms(0), &with_tip_gap(HandLandmark::RingTip, 5.0)),
        TraceFrame::empty(ms(33)),
        TraceFrame::empty(ms(66)),
    ]));
    let mut frames = Vec::new();
    while let Some(frame) = replay.capture_frame().unwrap() {
        frames.push(frame);
    }

    let mut t = tracker(vec![]);
    t.process_frame(&frames[0]).unwrap();
    let cursor = t.cursor_state();
    let gestures = t.gesture_state();
    assert!(gestures.is_dragging());

    for frame in &frames[1..] {
        assert!(t.process_frame(frame).unwrap().is_empty());
        assert_eq!(t.cursor_state(), cursor);
        assert_eq!(t.gesture_state(), gestures);
    }
    assert_eq!(t.stats().frames, 3);
    assert_eq!(t.stats().frames_with_hand, 1);
}

#[test]
fn hand_without_index_tip_does_not_move_cursor() {
    let mut hand = with_tip_gap(HandLandmark::RingTip, 5.0);
    hand.remove(HandLandmark::IndexTip);
    let mut t = tracker(vec![]);
    let frame = ReplayFrame {
        width: 640,
        height: 480,
        timestamp: Some(Duration::ZERO),
        hands: vec![hand],
    };

    let actions = t.process_frame(&frame).unwrap();
    assert_eq!(actions, vec![GestureAction::MouseDown]);
    assert_eq!(t.cursor_state().position(), Point2D::ORIGIN);
}

#[test]
fn exit_signal_stops_after_current_frame() {
    let frames = (0..10)
        .map(|i| TraceFrame::with_hand(ms(i * 33), &open_hand()))
        .collect();
    let mut t = tracker(frames);
    let exit = Arc::new(AtomicBool::new(true));

    assert_eq!(t.run(&exit).unwrap(), StopReason::ExitRequested);
    assert_eq!(t.stats().frames, 1);

    exit.store(false, Ordering::SeqCst);
    assert_eq!(t.run(&exit).unwrap(), StopReason::SourceExhausted);
    assert_eq!(t.stats().frames, 10);
}

#[test]
fn actuator_failures_do_not_stop_the_loop() {
    let frames = vec![
        TraceFrame::with_hand(ms(0), &with_tip_gap(HandLandmark::IndexTip, 5.0)),
        TraceFrame::with_hand(ms(500), &open_hand()),
        TraceFrame::with_hand(ms(1000), &with_tip_gap(HandLandmark::IndexTip, 5.0)),
    ];
    let mut t = HandTracker::new(
        TraceSource::new(trace(frames)),
        ReplayDetector,
        RecordingActuator::failing_buttons(DISPLAY),
        &AppConfig::default(),
    )
    .unwrap();

    assert_eq!(t.run(&NeverExit).unwrap(), StopReason::SourceExhausted);
    assert_eq!(t.stats().frames, 3);
    assert_eq!(t.stats().actuator_errors, 2);
    assert_eq!(
        t.actuator().gestures(),
        vec![GestureAction::Click, GestureAction::Click]
    );
}

/// Clicks fail with an I/O error rather than an actuator error.
struct UnpluggedActuator;

impl Actuator for UnpluggedActuator {
    fn move_to(&mut self, _x: f64, _y: f64) -> HandmouseResult<()> {
        Ok(())
    }
    fn click(&mut self) -> HandmouseResult<()> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "display gone").into())
    }
    fn double_click(&mut self) -> HandmouseResult<()> {
        Ok(())
    }
    fn right_click(&mut self) -> HandmouseResult<()> {
        Ok(())
    }
    fn mouse_down(&mut self) -> HandmouseResult<()> {
        Ok(())
    }
    fn mouse_up(&mut self) -> HandmouseResult<()> {
        Ok(())
    }
    fn scroll(&mut self, _amount: i32) -> HandmouseResult<()> {
        Ok(())
    }
    fn display_size(&self) -> HandmouseResult<DisplaySize> {
        Ok(DISPLAY)
    }
    fn name(&self) -> &str {
        "unplugged"
    }
}

#[test]
fn non_actuator_errors_from_the_actuator_stop_the_loop() {
    let frames = vec![
        TraceFrame::with_hand(ms(0), &with_tip_gap(HandLandmark::IndexTip, 5.0)),
        TraceFrame::with_hand(ms(33), &open_hand()),
    ];
    let mut t = HandTracker::new(
        TraceSource::new(trace(frames)),
        ReplayDetector,
        UnpluggedActuator,
        &AppConfig::default(),
    )
    .unwrap();

    assert!(matches!(t.run(&NeverExit), Err(HandmouseError::Io(_))));
    assert_eq!(t.stats().frames, 1);
    assert_eq!(t.stats().actuator_errors, 0);
}

#[test]
fn detection_failure_counts_as_frame_without_hand() {
    let mut t = tracker(vec![]);
    t.process_frame(&ReplayFrame {
        width: 640,
        height: 480,
        timestamp: Some(Duration::ZERO),
        hands: vec![with_tip_gap(HandLandmark::RingTip, 5.0)],
    })
    .unwrap();
    let cursor = t.cursor_state();
    let gestures = t.gesture_state();

    let malformed = ReplayFrame {
        width: 640,
        height: 480,
        timestamp: Some(Duration::from_millis(33)),
        hands: vec![KeypointSet::new()],
    };
    assert!(t.process_frame(&malformed).unwrap().is_empty());
    assert_eq!(t.cursor_state(), cursor);
    assert_eq!(t.gesture_state(), gestures);

    let stats = t.stats();
    assert_eq!(stats.frames, 2);
    assert_eq!(stats.frames_with_hand, 1);
    assert_eq!(stats.detection_errors, 1);
}

struct BrokenCamera {
    frames_left: u32,
}

impl FrameSource for BrokenCamera {
    type Frame = ReplayFrame;

    fn capture_frame(&mut self) -> HandmouseResult<Option<ReplayFrame>> {
        if self.frames_left == 0 {
            return Err(HandmouseError::capture("device disconnected"));
        }
        self.frames_left -= 1;
        Ok(Some(ReplayFrame {
            width: 640,
            height: 480,
            timestamp: None,
            hands: vec![],
        }))
    }

    fn name(&self) -> &str {
        "broken"
    }
}

#[test]
fn capture_failure_is_fatal() {
    let mut t = HandTracker::new(
        BrokenCamera { frames_left: 2 },
        ReplayDetector,
        RecordingActuator::new(DISPLAY),
        &AppConfig::default(),
    )
    .unwrap();

    let err = t.run(&NeverExit).unwrap_err();
    assert!(matches!(err, HandmouseError::Capture { .. }));
    assert_eq!(t.stats().frames, 2);
}

#[test]
fn zero_sized_frame_is_fatal() {
    let mut t = tracker(vec![]);
    let frame = ReplayFrame {
        width: 0,
        height: 480,
        timestamp: None,
        hands: vec![open_hand()],
    };
    assert!(matches!(
        t.process_frame(&frame),
        Err(HandmouseError::Processing { .. })
    ));
}

#[test]
fn config_display_overrides_actuator() {
    let mut config = AppConfig::default();
    config.tracking.display_width = Some(640);
    config.tracking.display_height = Some(480);

    let t = HandTracker::new(
        TraceSource::new(trace(vec![])),
        ReplayDetector,
        RecordingActuator::new(DISPLAY),
        &config,
    )
    .unwrap();
    assert_eq!(t.display(), DisplaySize::new(640, 480));
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = AppConfig::default();
    config.tracking.smoothening = 0.0;
    let result = HandTracker::new(
        TraceSource::new(trace(vec![])),
        ReplayDetector,
        RecordingActuator::new(DISPLAY),
        &config,
    );
    assert!(matches!(result, Err(HandmouseError::Config { .. })));
}

#[test]
fn thumbs_up_fixture_scrolls_up() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("traces")
        .join("thumbs_up.jsonl");

    let mut t = HandTracker::new(
        TraceSource::from_path(&path).unwrap(),
        ReplayDetector,
        RecordingActuator::new(DISPLAY),
        &AppConfig::default(),
    )
    .unwrap();
    t.run(&NeverExit).unwrap();

    let stats = t.stats();
    assert_eq!(stats.frames, 4);
    assert_eq!(stats.frames_with_hand, 3);
    assert_eq!(
        t.actuator().gestures(),
        vec![
            GestureAction::Scroll { amount: 200 },
            GestureAction::Scroll { amount: 200 },
        ]
    );
}
