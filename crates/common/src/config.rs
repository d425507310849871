//! Application configuration.
//!
//! Configuration is read-only: it is loaded from JSON (or defaulted) at
//! startup and never written back.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{HandmouseError, HandmouseResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Cursor mapping and smoothing.
    pub tracking: TrackingConfig,

    /// Gesture thresholds and timings.
    pub gestures: GestureConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Cursor mapping and smoothing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Smoothing constant `k`; each frame closes `1/k` of the gap to the fingertip.
    pub smoothening: f64,

    /// Amplification factor `A` applied to the smoothed displacement.
    pub amplification: f64,

    /// Display width override. Falls back to the actuator's display size.
    pub display_width: Option<u32>,

    /// Display height override. Falls back to the actuator's display size.
    pub display_height: Option<u32>,
}

/// Gesture classifier parameters. Distances are in display units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Thumb-to-index distance below which a left click fires.
    pub click_threshold: f64,

    /// Thumb-to-ring distance below which a drag is held.
    pub drag_threshold: f64,

    /// Thumb-to-middle distance below which a right click fires.
    pub right_click_threshold: f64,

    /// Two click triggers closer than this become a double click.
    pub double_click_window_secs: f64,

    /// Pipeline pause after each right click.
    pub right_click_pause_secs: f64,

    /// Dead band around the wrist height for thumbs-up/down scrolling.
    pub scroll_band: f64,

    /// Scroll magnitude emitted per frame.
    pub scroll_amount: i32,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "handmouse=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            smoothening: 7.0,
            amplification: 5.0,
            display_width: None,
            display_height: None,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            click_threshold: 70.0,
            drag_threshold: 70.0,
            right_click_threshold: 70.0,
            double_click_window_secs: 0.3,
            right_click_pause_secs: 1.0,
            scroll_band: 40.0,
            scroll_amount: 200,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl GestureConfig {
    pub fn double_click_window(&self) -> Duration {
        Duration::from_secs_f64(self.double_click_window_secs)
    }

    pub fn right_click_pause(&self) -> Duration {
        Duration::from_secs_f64(self.right_click_pause_secs)
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: &Path) -> HandmouseResult<Self> {
        if !path.exists() {
            return Err(HandmouseError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| HandmouseError::config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the smoother or classifier cannot work with.
    pub fn validate(&self) -> HandmouseResult<()> {
        let t = &self.tracking;
        if !t.smoothening.is_finite() || t.smoothening <= 0.0 {
            return Err(HandmouseError::config(format!(
                "smoothening must be a positive number, got {}",
                t.smoothening
            )));
        }
        if !t.amplification.is_finite() {
            return Err(HandmouseError::config("amplification must be finite"));
        }
        if t.display_width == Some(0) || t.display_height == Some(0) {
            return Err(HandmouseError::config("display size must be non-zero"));
        }

        let g = &self.gestures;
        let non_negative = [
            ("click_threshold", g.click_threshold),
            ("drag_threshold", g.drag_threshold),
            ("right_click_threshold", g.right_click_threshold),
            ("double_click_window_secs", g.double_click_window_secs),
            ("right_click_pause_secs", g.right_click_pause_secs),
            ("scroll_band", g.scroll_band),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(HandmouseError::config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if g.scroll_amount <= 0 {
            return Err(HandmouseError::config(format!(
                "scroll_amount must be positive, got {}",
                g.scroll_amount
            )));
        }
        Ok(())
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("handmouse").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_tuning() {
        let config = AppConfig::default();
        assert_eq!(config.tracking.smoothening, 7.0);
        assert_eq!(config.tracking.amplification, 5.0);
        assert_eq!(config.gestures.click_threshold, 70.0);
        assert_eq!(
            config.gestures.double_click_window(),
            Duration::from_millis(300)
        );
        assert_eq!(config.gestures.right_click_pause(), Duration::from_secs(1));
        assert_eq!(config.gestures.scroll_amount, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"tracking":{"smoothening":3.5}}"#).unwrap();
        assert_eq!(config.tracking.smoothening, 3.5);
        assert_eq!(config.tracking.amplification, 5.0);
        assert_eq!(config.gestures, GestureConfig::default());
    }

    #[test]
    fn test_validate_rejects_non_positive_smoothening() {
        let mut config = AppConfig::default();
        config.tracking.smoothening = 0.0;
        assert!(matches!(
            config.validate(),
            Err(HandmouseError::Config { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_scroll_amount() {
        let config: AppConfig =
            serde_json::from_str(r#"{"gestures":{"scroll_amount":-2147483648}}"#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(HandmouseError::Config { .. })
        ));

        let mut config = AppConfig::default();
        config.gestures.scroll_amount = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_threshold() {
        let mut config = AppConfig::default();
        config.gestures.drag_threshold = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = AppConfig::load_from(Path::new("/nonexistent/handmouse.json")).unwrap_err();
        assert!(matches!(err, HandmouseError::FileNotFound { .. }));
    }
}
