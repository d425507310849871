//! On-screen gesture guide.

use handmouse_common::config::GestureConfig;

pub const TITLE: &str = "Handmouse gestures";

/// Guide lines, one per gesture, for overlays and the CLI.
pub fn gesture_guide() -> &'static [&'static str] {
    &[
        "Move cursor: point with the index finger",
        "Left click: touch thumb to index finger (twice quickly to double click)",
        "Right click: touch thumb to middle finger",
        "Drag: hold thumb against ring finger, release to drop",
        "Scroll: make a fist, thumb up scrolls up, thumb down scrolls down",
    ]
}

/// Numbered guide with the active thresholds appended.
pub fn detailed_guide(config: &GestureConfig) -> Vec<String> {
    let mut lines: Vec<String> = gesture_guide()
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{}. {line}", i + 1))
        .collect();
    lines.push(format!(
        "Pinch distance: {} units (click), {} (drag), {} (right click)",
        config.click_threshold, config.drag_threshold, config.right_click_threshold
    ));
    lines.push(format!(
        "Double click window: {:.2}s, right click pause: {:.2}s",
        config.double_click_window_secs, config.right_click_pause_secs
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detailed_guide_is_numbered_and_has_thresholds() {
        let lines = detailed_guide(&GestureConfig::default());
        assert_eq!(lines.len(), gesture_guide().len() + 2);
        assert!(lines[0].starts_with("1. Move cursor"));
        assert!(lines[5].contains("70"));
        assert!(lines[6].contains("0.30s"));
    }
}
