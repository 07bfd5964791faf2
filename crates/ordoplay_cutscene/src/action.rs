// SPDX-License-Identifier: MIT OR Apache-2.0
//! Step definitions for a cutscene sequence.
//!
//! A [`SequenceAction`] describes one step: up to three tracks (animation,
//! audio, camera move) that start together, plus the flags that decide which
//! of them the step waits for before the sequence advances.

use crate::binding::EntityId;
use crate::interpolation::Vec3;
use serde::{Deserialize, Serialize};

/// Reference to an animation or audio clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipRef {
    /// Clip identifier understood by the playback device
    pub name: String,
    /// Authored length in seconds
    pub duration: f32,
}

impl ClipRef {
    /// Create a clip reference
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }
}

/// A validated camera move range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRange {
    /// Position at the start of the move
    pub start: Vec3,
    /// Position the move ends on
    pub end: Vec3,
}

/// One step of a sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceAction {
    /// Animation clip to play on the character
    pub animation: Option<ClipRef>,
    /// Audio clip to play
    pub audio: Option<ClipRef>,
    /// Entity that can be hidden once the step is done
    pub target: Option<EntityId>,
    /// Camera move start position
    pub camera_start: Option<Vec3>,
    /// Camera move end position
    pub camera_end: Option<Vec3>,
    /// Block advancement until the animation finishes
    pub wait_for_animation: bool,
    /// Block advancement until the audio finishes
    pub wait_for_audio: bool,
    /// Hide `target` after the awaited tracks finish
    pub disable_target_after_action: bool,
}

impl SequenceAction {
    /// Create an empty step
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the animation clip
    pub fn with_animation(mut self, clip: ClipRef) -> Self {
        self.animation = Some(clip);
        self
    }

    /// Set the audio clip
    pub fn with_audio(mut self, clip: ClipRef) -> Self {
        self.audio = Some(clip);
        self
    }

    /// Set the camera move endpoints
    pub fn with_camera(mut self, start: Vec3, end: Vec3) -> Self {
        self.camera_start = Some(start);
        self.camera_end = Some(end);
        self
    }

    /// Set the target entity
    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    /// Wait for the animation before advancing
    pub fn waiting_for_animation(mut self) -> Self {
        self.wait_for_animation = true;
        self
    }

    /// Wait for the audio before advancing
    pub fn waiting_for_audio(mut self) -> Self {
        self.wait_for_audio = true;
        self
    }

    /// Hide the target once the step is done
    pub fn disabling_target(mut self) -> Self {
        self.disable_target_after_action = true;
        self
    }

    /// The camera move for this step, if it has a usable one.
    ///
    /// Both endpoints must be set and must differ. Anything else means the
    /// step has no camera track.
    pub fn camera_range(&self) -> Option<CameraRange> {
        let (start, end) = (self.camera_start?, self.camera_end?);
        if start == end {
            return None;
        }
        Some(CameraRange { start, end })
    }

    /// Whether the step awaits its animation track
    pub fn awaits_animation(&self) -> bool {
        self.wait_for_animation && self.animation.is_some()
    }

    /// Whether the step awaits its audio track
    pub fn awaits_audio(&self) -> bool {
        self.wait_for_audio && self.audio.is_some()
    }

    /// True when no track would be launched for this step
    pub fn is_empty(&self) -> bool {
        self.animation.is_none() && self.audio.is_none() && self.camera_range().is_none()
    }

    /// Target to hide after the step, if configured
    pub fn target_to_disable(&self) -> Option<EntityId> {
        if self.disable_target_after_action {
            self.target
        } else {
            None
        }
    }
}
