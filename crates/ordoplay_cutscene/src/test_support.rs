// SPDX-License-Identifier: MIT OR Apache-2.0
//! Recording devices for unit tests.

use crate::action::ClipRef;
use crate::binding::EntityId;
use crate::device::{AnimationDevice, AudioDevice, TransformSink, VisibilitySink};
use crate::interpolation::Vec3;

/// Animator that records clip names
#[derive(Debug, Default)]
pub struct RecordingAnimator {
    pub played: Vec<String>,
    pub duration_override: Option<f32>,
}

impl RecordingAnimator {
    pub fn with_override(duration: f32) -> Self {
        Self {
            played: Vec::new(),
            duration_override: Some(duration),
        }
    }
}

impl AnimationDevice for RecordingAnimator {
    fn play(&mut self, clip: &ClipRef) -> f32 {
        self.played.push(clip.name.clone());
        self.duration_override.unwrap_or(clip.duration)
    }
}

/// Audio source that records clip names
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub played: Vec<String>,
}

impl AudioDevice for RecordingAudio {
    fn play(&mut self, clip: &ClipRef) -> f32 {
        self.played.push(clip.name.clone());
        clip.duration
    }
}

/// Camera that records every position write
#[derive(Debug, Default)]
pub struct RecordingCamera {
    pub positions: Vec<Vec3>,
}

impl RecordingCamera {
    pub fn last(&self) -> Option<Vec3> {
        self.positions.last().copied()
    }
}

impl TransformSink for RecordingCamera {
    fn set_position(&mut self, position: Vec3) {
        self.positions.push(position);
    }
}

/// Visibility sink that records every call
#[derive(Debug, Default)]
pub struct RecordingVisibility {
    pub calls: Vec<(EntityId, bool)>,
}

impl VisibilitySink for RecordingVisibility {
    fn set_active(&mut self, entity: EntityId, active: bool) {
        self.calls.push((entity, active));
    }
}
