// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sequence files.
//!
//! A sequence is authored as a RON document holding the ordered steps and
//! the camera move length shared by every step:
//!
//! ```ron
//! SequenceConfig(
//!     version: 1,
//!     name: "Intro",
//!     camera_move_duration: 2.0,
//!     steps: [
//!         (animation: Some((name: "wave", duration: 1.0)), wait_for_animation: true),
//!     ],
//! )
//! ```

use crate::action::{ClipRef, SequenceAction};
use crate::error::{CutsceneError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current sequence format version
pub const SEQUENCE_FORMAT_VERSION: u32 = 1;

/// Default camera move length in seconds
pub const DEFAULT_CAMERA_MOVE_DURATION: f32 = 2.0;

/// Sequence file extension
pub const SEQUENCE_FILE_EXTENSION: &str = "cutscene";

fn default_version() -> u32 {
    SEQUENCE_FORMAT_VERSION
}

fn default_camera_move_duration() -> f32 {
    DEFAULT_CAMERA_MOVE_DURATION
}

/// A sequence as loaded from disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceConfig {
    /// Format version
    #[serde(default = "default_version")]
    pub version: u32,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Length of every camera move in seconds
    #[serde(default = "default_camera_move_duration")]
    pub camera_move_duration: f32,
    /// Steps in play order
    #[serde(default)]
    pub steps: Vec<SequenceAction>,
}

impl SequenceConfig {
    /// Create an empty sequence
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: SEQUENCE_FORMAT_VERSION,
            name: name.into(),
            camera_move_duration: DEFAULT_CAMERA_MOVE_DURATION,
            steps: Vec::new(),
        }
    }

    /// Append a step
    pub fn with_step(mut self, step: SequenceAction) -> Self {
        self.steps.push(step);
        self
    }

    /// Set the camera move length
    pub fn with_camera_move_duration(mut self, duration: f32) -> Self {
        self.camera_move_duration = duration;
        self
    }

    /// Check the sequence can be played
    pub fn validate(&self) -> Result<()> {
        if self.version > SEQUENCE_FORMAT_VERSION {
            return Err(CutsceneError::UnsupportedVersion {
                found: self.version,
                supported: SEQUENCE_FORMAT_VERSION,
            });
        }

        if !self.camera_move_duration.is_finite() || self.camera_move_duration < 0.0 {
            return Err(CutsceneError::InvalidCameraDuration(self.camera_move_duration));
        }

        for (step, action) in self.steps.iter().enumerate() {
            for clip in [&action.animation, &action.audio].into_iter().flatten() {
                check_clip(step, clip)?;
            }
        }

        Ok(())
    }

    /// Deserialize from RON format
    pub fn from_ron(s: &str) -> Result<Self> {
        Ok(ron::from_str(s)?)
    }

    /// Serialize to RON format
    pub fn to_ron(&self) -> Result<String> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    /// Load and validate a sequence file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_ron(&content)?;
        config.validate()?;
        tracing::debug!("Loaded sequence file {}", path.display());
        Ok(config)
    }

    /// Save the sequence to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_ron()?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self::new("Untitled Sequence")
    }
}

fn check_clip(step: usize, clip: &ClipRef) -> Result<()> {
    if clip.duration.is_finite() && clip.duration >= 0.0 {
        Ok(())
    } else {
        Err(CutsceneError::InvalidClipDuration {
            step,
            clip: clip.name.clone(),
            duration: clip.duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::EntityId;

    fn sample() -> SequenceConfig {
        SequenceConfig::new("Intro")
            .with_step(
                SequenceAction::new()
                    .with_animation(ClipRef::new("wave", 1.0))
                    .waiting_for_animation()
                    .with_target(EntityId::new())
                    .disabling_target(),
            )
            .with_step(
                SequenceAction::new()
                    .with_audio(ClipRef::new("hello", 0.5))
                    .with_camera([0.0, 1.0, -5.0], [0.0, 1.0, -2.0]),
            )
    }

    #[test]
    fn test_default_config() {
        let config = SequenceConfig::default();
        assert_eq!(config.version, SEQUENCE_FORMAT_VERSION);
        assert_eq!(config.camera_move_duration, 2.0);
        assert!(config.steps.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serialization() {
        let config = sample();
        let ron_str = config.to_ron().unwrap();
        let loaded = SequenceConfig::from_ron(&ron_str).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_minimal_file_uses_defaults() {
        let config =
            SequenceConfig::from_ron("(steps: [(wait_for_animation: false), (wait_for_audio: true)])")
                .unwrap();
        assert_eq!(config.version, SEQUENCE_FORMAT_VERSION);
        assert_eq!(config.camera_move_duration, DEFAULT_CAMERA_MOVE_DURATION);
        assert_eq!(config.steps.len(), 2);
        assert!(config.steps[0].is_empty());
    }

    #[test]
    fn test_parse_error() {
        let result = SequenceConfig::from_ron("(steps: [");
        assert!(matches!(result, Err(CutsceneError::Parse(_))));
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let mut config = sample();
        config.version = SEQUENCE_FORMAT_VERSION + 1;
        assert!(matches!(
            config.validate(),
            Err(CutsceneError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn test_invalid_camera_duration() {
        for duration in [-1.0, f32::NAN, f32::INFINITY] {
            let config = sample().with_camera_move_duration(duration);
            assert!(matches!(
                config.validate(),
                Err(CutsceneError::InvalidCameraDuration(_))
            ));
        }
        assert!(sample().with_camera_move_duration(0.0).validate().is_ok());
    }

    #[test]
    fn test_invalid_clip_duration_names_the_step() {
        let config = sample().with_step(SequenceAction::new().with_audio(ClipRef::new("bad", -0.5)));
        match config.validate() {
            Err(CutsceneError::InvalidClipDuration { step, clip, .. }) => {
                assert_eq!(step, 2);
                assert_eq!(clip, "bad");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "ordoplay_cutscene_{}.{SEQUENCE_FILE_EXTENSION}",
            uuid::Uuid::new_v4()
        ));
        let config = sample();
        config.save(&path).unwrap();
        let loaded = SequenceConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let result = SequenceConfig::load(Path::new("/nonexistent/intro.cutscene"));
        assert!(matches!(result, Err(CutsceneError::Io(_))));
    }
}
