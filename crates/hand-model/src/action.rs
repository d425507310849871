//! Pointer commands emitted by the pipeline.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A single command for the pointer actuator.
///
/// Actions are produced in order within a frame and must be executed in
/// that order; `Pause` blocks the whole pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureAction {
    /// Move the cursor to an absolute display position.
    MoveTo { x: f64, y: f64 },

    /// Left click.
    Click,

    /// Left double click.
    DoubleClick,

    /// Right click.
    RightClick,

    /// Press and hold the left button (drag start).
    MouseDown,

    /// Release the left button (drag end).
    MouseUp,

    /// Vertical scroll; positive scrolls up.
    Scroll { amount: i32 },

    /// Stall the pipeline for the given duration.
    Pause {
        #[serde(with = "duration_secs")]
        duration: Duration,
    },
}

impl GestureAction {
    /// Short label for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MoveTo { .. } => "move_to",
            Self::Click => "click",
            Self::DoubleClick => "double_click",
            Self::RightClick => "right_click",
            Self::MouseDown => "mouse_down",
            Self::MouseUp => "mouse_up",
            Self::Scroll { .. } => "scroll",
            Self::Pause { .. } => "pause",
        }
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&GestureAction::Scroll { amount: -200 }).unwrap();
        assert_eq!(json, r#"{"type":"scroll","amount":-200}"#);

        let json = serde_json::to_string(&GestureAction::Click).unwrap();
        assert_eq!(json, r#"{"type":"click"}"#);
    }

    #[test]
    fn test_pause_serializes_as_seconds() {
        let action = GestureAction::Pause {
            duration: Duration::from_millis(1500),
        };
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"type":"pause","duration":1.5}"#);

        let parsed: GestureAction = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, action);
    }

    #[test]
    fn test_negative_pause_is_rejected() {
        let parsed = serde_json::from_str::<GestureAction>(r#"{"type":"pause","duration":-1}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_names_match_serde_tags() {
        for action in [
            GestureAction::DoubleClick,
            GestureAction::MouseDown,
            GestureAction::Scroll { amount: 1 },
        ] {
            let json = serde_json::to_string(&action).unwrap();
            assert!(json.contains(&format!(r#""type":"{}""#, action.name())));
        }
    }
}
