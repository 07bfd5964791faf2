// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for cutscene loading and playback.

use crate::track::TrackKind;
use thiserror::Error;

/// Cutscene errors
#[derive(Debug, Error)]
pub enum CutsceneError {
    /// Reading or writing a sequence file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Sequence file is not valid RON
    #[error("Failed to parse sequence: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Sequence could not be written as RON
    #[error("Failed to serialize sequence: {0}")]
    Serialize(#[from] ron::Error),

    /// Sequence was written by a newer format
    #[error("Sequence version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Newest version this build reads
        supported: u32,
    },

    /// Camera move duration is negative or not a number
    #[error("Invalid camera move duration: {0}")]
    InvalidCameraDuration(f32),

    /// A clip has a negative or non-finite duration
    #[error("Step {step}: clip '{clip}' has invalid duration {duration}")]
    InvalidClipDuration {
        /// Step index
        step: usize,
        /// Clip name
        clip: String,
        /// Offending duration
        duration: f32,
    },

    /// A track needs a device that was not bound
    #[error("No {0} device bound")]
    MissingDevice(DeviceKind),
}

/// Result type for cutscene operations
pub type Result<T> = std::result::Result<T, CutsceneError>;

/// Host capability a step may need
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// Character animation playback
    Animation,
    /// Audio playback
    Audio,
    /// Camera transform
    Camera,
    /// Entity visibility
    Visibility,
}

impl DeviceKind {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Animation => "animation",
            Self::Audio => "audio",
            Self::Camera => "camera",
            Self::Visibility => "visibility",
        }
    }
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<TrackKind> for DeviceKind {
    fn from(kind: TrackKind) -> Self {
        match kind {
            TrackKind::Animation => Self::Animation,
            TrackKind::Audio => Self::Audio,
            TrackKind::Camera => Self::Camera,
        }
    }
}
