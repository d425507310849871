//! Error types shared across Handmouse crates.

use std::path::PathBuf;

/// Top-level error type for Handmouse operations.
#[derive(Debug, thiserror::Error)]
pub enum HandmouseError {
    #[error("Capture error: {message}")]
    Capture { message: String },

    #[error("Detection error: {message}")]
    Detection { message: String },

    #[error("Actuator error: {message}")]
    Actuator { message: String },

    #[error("Processing error: {message}")]
    Processing { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using HandmouseError.
pub type HandmouseResult<T> = Result<T, HandmouseError>;

impl HandmouseError {
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture {
            message: msg.into(),
        }
    }

    pub fn detection(msg: impl Into<String>) -> Self {
        Self::Detection {
            message: msg.into(),
        }
    }

    pub fn actuator(msg: impl Into<String>) -> Self {
        Self::Actuator {
            message: msg.into(),
        }
    }

    pub fn processing(msg: impl Into<String>) -> Self {
        Self::Processing {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether this error ends the tracking session. Detector and actuator
    /// failures only cost the current frame.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Actuator { .. } | Self::Detection { .. })
    }
}
