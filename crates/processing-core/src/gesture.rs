//! Gesture classification.
//!
//! Four rules are evaluated every frame, in this order, against the mapped
//! keypoints of the detected hand:
//!
//! | Rule        | Trigger                                   | Kind            |
//! |-------------|-------------------------------------------|-----------------|
//! | Click       | thumb tip near index tip                  | edge-triggered  |
//! | Drag        | thumb tip near ring tip                   | press / release |
//! | Right click | thumb tip near middle tip                 | level-triggered |
//! | Scroll      | four fingers curled, thumb above/below wrist | level-triggered |
//!
//! "Near" compares vertical separation only. Click and drag keep their own
//! phase in [`GestureState`] and can be active at the same time.
//!
//! A rule whose keypoints are missing from the frame is skipped and its
//! phase is left as it was.

use std::time::Duration;

use handmouse_common::config::GestureConfig;
use handmouse_hand_model::{GestureAction, HandLandmark, KeypointSet};

/// Left-click phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickPhase {
    /// No click latched; the next pinched frame fires.
    #[default]
    Idle,
    /// A single click fired and the pinch has not been released.
    Held,
}

/// Left-button drag phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Left button is held down.
    Dragging,
}

/// Gesture state carried across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureState {
    /// When the last single click fired; cleared by a double click.
    last_click: Option<Duration>,
    click: ClickPhase,
    drag: DragPhase,
}

impl GestureState {
    pub fn last_click(&self) -> Option<Duration> {
        self.last_click
    }

    pub fn click_phase(&self) -> ClickPhase {
        self.click
    }

    pub fn drag_phase(&self) -> DragPhase {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag == DragPhase::Dragging
    }
}

/// Evaluates gesture rules for one frame at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureClassifier {
    click_threshold: f64,
    drag_threshold: f64,
    right_click_threshold: f64,
    double_click_window: Duration,
    right_click_pause: Duration,
    scroll_band: f64,
    scroll_amount: i32,
}

impl GestureClassifier {
    /// Build a classifier from validated config.
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            click_threshold: config.click_threshold,
            drag_threshold: config.drag_threshold,
            right_click_threshold: config.right_click_threshold,
            double_click_window: config.double_click_window(),
            right_click_pause: config.right_click_pause(),
            scroll_band: config.scroll_band,
            scroll_amount: config.scroll_amount,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(&GestureConfig::default())
    }

    /// Classify one frame. `keypoints` must already be in display units and
    /// `now` is the frame time since session start.
    pub fn classify(
        &self,
        state: &mut GestureState,
        keypoints: &KeypointSet,
        now: Duration,
    ) -> Vec<GestureAction> {
        let mut actions = Vec::new();
        let Some(thumb) = keypoints.get(HandLandmark::ThumbTip) else {
            tracing::trace!("thumb tip missing, skipping gesture rules");
            return actions;
        };

        let near = |tip: HandLandmark, threshold: f64| {
            keypoints
                .get(tip)
                .map(|p| p.vertical_distance(&thumb) < threshold)
        };

        if let Some(pinched) = near(HandLandmark::IndexTip, self.click_threshold) {
            self.update_click(state, pinched, now, &mut actions);
        }

        if let Some(pinched) = near(HandLandmark::RingTip, self.drag_threshold) {
            self.update_drag(state, pinched, &mut actions);
        }

        if near(HandLandmark::MiddleTip, self.right_click_threshold) == Some(true) {
            actions.push(GestureAction::RightClick);
            if !self.right_click_pause.is_zero() {
                actions.push(GestureAction::Pause {
                    duration: self.right_click_pause,
                });
            }
        }

        if let Some(amount) = self.scroll_amount_for(keypoints, thumb.y) {
            actions.push(GestureAction::Scroll { amount });
        }

        actions
    }

    fn update_click(
        &self,
        state: &mut GestureState,
        pinched: bool,
        now: Duration,
        actions: &mut Vec<GestureAction>,
    ) {
        match (state.click, pinched) {
            (ClickPhase::Idle, true) => {
                let within_window = state
                    .last_click
                    .and_then(|t| now.checked_sub(t))
                    .is_some_and(|elapsed| elapsed < self.double_click_window);

                if within_window {
                    actions.push(GestureAction::DoubleClick);
                    state.last_click = None;
                    state.click = ClickPhase::Idle;
                } else {
                    actions.push(GestureAction::Click);
                    state.last_click = Some(now);
                    state.click = ClickPhase::Held;
                }
            }
            (ClickPhase::Held, false) => state.click = ClickPhase::Idle,
            _ => {}
        }
    }

    fn update_drag(&self, state: &mut GestureState, pinched: bool, actions: &mut Vec<GestureAction>) {
        match (state.drag, pinched) {
            (DragPhase::Idle, true) => {
                tracing::debug!("drag started");
                actions.push(GestureAction::MouseDown);
                state.drag = DragPhase::Dragging;
            }
            (DragPhase::Dragging, false) => {
                tracing::debug!("drag released");
                actions.push(GestureAction::MouseUp);
                state.drag = DragPhase::Idle;
            }
            _ => {}
        }
    }

    /// Thumbs-up scrolls up, thumbs-down scrolls down, but only while all
    /// four fingers are curled.
    fn scroll_amount_for(&self, keypoints: &KeypointSet, thumb_y: f64) -> Option<i32> {
        for tip in HandLandmark::FINGER_TIPS {
            if keypoints.is_extended(tip)? {
                return None;
            }
        }

        let wrist_y = keypoints.get(HandLandmark::Wrist)?.y;
        if thumb_y < wrist_y - self.scroll_band {
            Some(self.scroll_amount)
        } else if thumb_y > wrist_y + self.scroll_band {
            Some(self.scroll_amount.saturating_neg())
        } else {
            None
        }
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}
