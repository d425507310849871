//! OS pointer control through `enigo`.

use enigo::{Enigo, MouseButton, MouseControllable};

use handmouse_common::error::{HandmouseError, HandmouseResult};
use handmouse_platform_core::{Actuator, DisplaySize};

/// Drives the real system cursor.
pub struct OsActuator {
    enigo: Enigo,
}

impl OsActuator {
    pub fn new() -> Self {
        Self {
            enigo: Enigo::new(),
        }
    }
}

impl Default for OsActuator {
    fn default() -> Self {
        Self::new()
    }
}

impl Actuator for OsActuator {
    fn move_to(&mut self, x: f64, y: f64) -> HandmouseResult<()> {
        self.enigo.mouse_move_to(x.round() as i32, y.round() as i32);
        Ok(())
    }

    fn click(&mut self) -> HandmouseResult<()> {
        self.enigo.mouse_click(MouseButton::Left);
        Ok(())
    }

    fn double_click(&mut self) -> HandmouseResult<()> {
        self.enigo.mouse_click(MouseButton::Left);
        self.enigo.mouse_click(MouseButton::Left);
        Ok(())
    }

    fn right_click(&mut self) -> HandmouseResult<()> {
        self.enigo.mouse_click(MouseButton::Right);
        Ok(())
    }

    fn mouse_down(&mut self) -> HandmouseResult<()> {
        self.enigo.mouse_down(MouseButton::Left);
        Ok(())
    }

    fn mouse_up(&mut self) -> HandmouseResult<()> {
        self.enigo.mouse_up(MouseButton::Left);
        Ok(())
    }

    fn scroll(&mut self, amount: i32) -> HandmouseResult<()> {
        // enigo scrolls down for positive lengths
        self.enigo.mouse_scroll_y(amount.saturating_neg());
        Ok(())
    }

    fn display_size(&self) -> HandmouseResult<DisplaySize> {
        let (width, height) = self.enigo.main_display_size();
        if width <= 0 || height <= 0 {
            return Err(HandmouseError::actuator(format!(
                "main display reports invalid size {width}x{height}"
            )));
        }
        Ok(DisplaySize::new(width as u32, height as u32))
    }

    fn name(&self) -> &str {
        "enigo"
    }
}
