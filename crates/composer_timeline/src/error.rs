// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline error types.

/// Errors raised by timeline evaluation, persistence and settings.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    /// Sequences of different lengths cannot be blended element-wise
    #[error("Cannot interpolate sequences of length {left} and {right}")]
    SequenceLengthMismatch {
        /// Length of the left operand
        left: usize,
        /// Length of the right operand
        right: usize,
    },

    /// A document value has no keyframe representation
    #[error("Unsupported keyframe value: {0}")]
    UnsupportedValue(String),

    /// JSON export/import error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings written by a newer format
    #[error("Settings version {found} is newer than supported version {supported}")]
    UnsupportedSettingsVersion {
        /// Version in the file
        found: u32,
        /// Newest readable version
        supported: u32,
    },

    /// RON parse error
    #[error("Settings parse error: {0}")]
    SettingsParse(#[from] ron::error::SpannedError),

    /// RON write error
    #[error("Settings write error: {0}")]
    SettingsWrite(#[from] ron::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for timeline operations
pub type Result<T> = std::result::Result<T, TimelineError>;

/// Error returned by an event callback.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct CallbackError {
    /// What went wrong
    pub message: String,
}

impl CallbackError {
    /// Create a callback error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
