//! Pointer actuator implementations.

#[cfg(feature = "enigo")]
pub mod os;

use std::time::Duration;

use handmouse_common::error::{HandmouseError, HandmouseResult};
use handmouse_hand_model::GestureAction;
use handmouse_platform_core::{Actuator, DisplaySize};

/// Dry-run actuator: logs every command instead of touching the OS pointer.
///
/// Pauses still block, so a replay keeps the timing of a live session.
pub struct LoggingActuator {
    display: DisplaySize,
}

impl LoggingActuator {
    pub fn new(display: DisplaySize) -> Self {
        Self { display }
    }

    fn log(&self, action: GestureAction) -> HandmouseResult<()> {
        match action {
            GestureAction::MoveTo { x, y } => tracing::trace!(x, y, "move_to"),
            other => {
                let json = serde_json::to_string(&other)?;
                tracing::info!(action = %json, "pointer");
            }
        }
        Ok(())
    }
}

impl Actuator for LoggingActuator {
    fn move_to(&mut self, x: f64, y: f64) -> HandmouseResult<()> {
        self.log(GestureAction::MoveTo { x, y })
    }

    fn click(&mut self) -> HandmouseResult<()> {
        self.log(GestureAction::Click)
    }

    fn double_click(&mut self) -> HandmouseResult<()> {
        self.log(GestureAction::DoubleClick)
    }

    fn right_click(&mut self) -> HandmouseResult<()> {
        self.log(GestureAction::RightClick)
    }

    fn mouse_down(&mut self) -> HandmouseResult<()> {
        self.log(GestureAction::MouseDown)
    }

    fn mouse_up(&mut self) -> HandmouseResult<()> {
        self.log(GestureAction::MouseUp)
    }

    fn scroll(&mut self, amount: i32) -> HandmouseResult<()> {
        self.log(GestureAction::Scroll { amount })
    }

    fn sleep(&mut self, duration: Duration) {
        tracing::debug!(secs = duration.as_secs_f64(), "pause");
        std::thread::sleep(duration);
    }

    fn display_size(&self) -> HandmouseResult<DisplaySize> {
        Ok(self.display)
    }

    fn name(&self) -> &str {
        "log"
    }
}

/// Records every command in memory. Pauses are recorded, not slept.
#[derive(Debug, Default)]
pub struct RecordingActuator {
    display: DisplaySize,
    actions: Vec<GestureAction>,
    fail_buttons: bool,
}

impl RecordingActuator {
    pub fn new(display: DisplaySize) -> Self {
        Self {
            display,
            actions: Vec::new(),
            fail_buttons: false,
        }
    }

    /// An actuator whose button and scroll calls fail after being recorded.
    pub fn failing_buttons(display: DisplaySize) -> Self {
        Self {
            fail_buttons: true,
            ..Self::new(display)
        }
    }

    /// Everything recorded so far, in call order.
    pub fn actions(&self) -> &[GestureAction] {
        &self.actions
    }

    /// Recorded commands other than cursor moves.
    pub fn gestures(&self) -> Vec<GestureAction> {
        self.actions
            .iter()
            .copied()
            .filter(|a| !matches!(a, GestureAction::MoveTo { .. }))
            .collect()
    }

    /// Last cursor position sent, if any.
    pub fn last_position(&self) -> Option<(f64, f64)> {
        self.actions.iter().rev().find_map(|a| match a {
            GestureAction::MoveTo { x, y } => Some((*x, *y)),
            _ => None,
        })
    }

    fn record_button(&mut self, action: GestureAction) -> HandmouseResult<()> {
        self.actions.push(action);
        if self.fail_buttons {
            return Err(HandmouseError::actuator(format!(
                "{} rejected",
                action.name()
            )));
        }
        Ok(())
    }
}

impl Actuator for RecordingActuator {
    fn move_to(&mut self, x: f64, y: f64) -> HandmouseResult<()> {
        self.actions.push(GestureAction::MoveTo { x, y });
        Ok(())
    }

    fn click(&mut self) -> HandmouseResult<()> {
        self.record_button(GestureAction::Click)
    }

    fn double_click(&mut self) -> HandmouseResult<()> {
        self.record_button(GestureAction::DoubleClick)
    }

    fn right_click(&mut self) -> HandmouseResult<()> {
        self.record_button(GestureAction::RightClick)
    }

    fn mouse_down(&mut self) -> HandmouseResult<()> {
        self.record_button(GestureAction::MouseDown)
    }

    fn mouse_up(&mut self) -> HandmouseResult<()> {
        self.record_button(GestureAction::MouseUp)
    }

    fn scroll(&mut self, amount: i32) -> HandmouseResult<()> {
        self.record_button(GestureAction::Scroll { amount })
    }

    fn sleep(&mut self, duration: Duration) {
        self.actions.push(GestureAction::Pause { duration });
    }

    fn display_size(&self) -> HandmouseResult<DisplaySize> {
        Ok(self.display)
    }

    fn name(&self) -> &str {
        "recording"
    }
}
