// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host capabilities the cutscene drives.
//!
//! The executor never owns playback, rendering or scene state. It writes to
//! whatever the host binds here, once per side effect.

use crate::action::ClipRef;
use crate::binding::EntityId;
use crate::error::{CutsceneError, DeviceKind};
use crate::interpolation::Vec3;

/// Plays character animation clips
pub trait AnimationDevice {
    /// Start playing `clip` and return how long it runs, in seconds
    fn play(&mut self, clip: &ClipRef) -> f32;
}

/// Plays audio clips
pub trait AudioDevice {
    /// Start playing `clip` and return how long it runs, in seconds
    fn play(&mut self, clip: &ClipRef) -> f32;
}

/// Receives camera positions
pub trait TransformSink {
    /// Move the transform. Last write wins.
    fn set_position(&mut self, position: Vec3);
}

/// Shows and hides scene entities
pub trait VisibilitySink {
    /// Activate or deactivate an entity
    fn set_active(&mut self, entity: EntityId, active: bool);
}

/// Devices bound for one run of a sequence
#[derive(Default)]
pub struct Devices<'a> {
    /// Character animator
    pub animator: Option<&'a mut dyn AnimationDevice>,
    /// Audio source
    pub audio: Option<&'a mut dyn AudioDevice>,
    /// Virtual camera transform
    pub camera: Option<&'a mut dyn TransformSink>,
    /// Entity visibility
    pub visibility: Option<&'a mut dyn VisibilitySink>,
}

impl<'a> Devices<'a> {
    /// Create an empty binding set
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the animation device
    pub fn with_animator(mut self, animator: &'a mut dyn AnimationDevice) -> Self {
        self.animator = Some(animator);
        self
    }

    /// Bind the audio device
    pub fn with_audio(mut self, audio: &'a mut dyn AudioDevice) -> Self {
        self.audio = Some(audio);
        self
    }

    /// Bind the camera transform
    pub fn with_camera(mut self, camera: &'a mut dyn TransformSink) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Bind the visibility sink
    pub fn with_visibility(mut self, visibility: &'a mut dyn VisibilitySink) -> Self {
        self.visibility = Some(visibility);
        self
    }

    /// Whether a device of `kind` is bound
    pub fn has(&self, kind: DeviceKind) -> bool {
        match kind {
            DeviceKind::Animation => self.animator.is_some(),
            DeviceKind::Audio => self.audio.is_some(),
            DeviceKind::Camera => self.camera.is_some(),
            DeviceKind::Visibility => self.visibility.is_some(),
        }
    }

    /// Fail with [`CutsceneError::MissingDevice`] if `kind` is unbound
    pub fn require(&self, kind: DeviceKind) -> Result<(), CutsceneError> {
        if self.has(kind) {
            Ok(())
        } else {
            Err(CutsceneError::MissingDevice(kind))
        }
    }

    /// Play an animation clip; returns how long the task must wait
    pub(crate) fn play_animation(&mut self, clip: &ClipRef) -> Option<f32> {
        self.animator
            .as_deref_mut()
            .map(|animator| clip_wait(animator.play(clip), clip))
    }

    /// Play an audio clip; returns how long the task must wait
    pub(crate) fn play_audio(&mut self, clip: &ClipRef) -> Option<f32> {
        self.audio
            .as_deref_mut()
            .map(|audio| clip_wait(audio.play(clip), clip))
    }

    pub(crate) fn set_camera_position(&mut self, position: Vec3) {
        if let Some(camera) = self.camera.as_deref_mut() {
            camera.set_position(position);
        }
    }

    pub(crate) fn set_active(&mut self, entity: EntityId, active: bool) -> bool {
        match self.visibility.as_deref_mut() {
            Some(visibility) => {
                visibility.set_active(entity, active);
                true
            }
            None => false,
        }
    }
}

/// Wait time for a clip: never shorter than its authored length
fn clip_wait(reported: f32, clip: &ClipRef) -> f32 {
    if reported.is_finite() && reported >= 0.0 {
        clip.duration.max(reported)
    } else {
        tracing::warn!(
            "Device reported duration {reported} for clip '{}', using authored {:.3}s",
            clip.name,
            clip.duration
        );
        clip.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RecordingAnimator, RecordingVisibility};

    #[test]
    fn test_require_reports_missing_devices() {
        let mut animator = RecordingAnimator::default();
        let devices = Devices::new().with_animator(&mut animator);

        assert!(devices.require(DeviceKind::Animation).is_ok());
        assert!(matches!(
            devices.require(DeviceKind::Audio),
            Err(CutsceneError::MissingDevice(DeviceKind::Audio))
        ));
        assert!(!devices.has(DeviceKind::Camera));
        assert!(!devices.has(DeviceKind::Visibility));
    }

    #[test]
    fn test_bad_device_durations_fall_back_to_authored() {
        for reported in [f32::NAN, f32::INFINITY, -2.0] {
            let mut animator = RecordingAnimator::with_override(reported);
            let mut devices = Devices::new().with_animator(&mut animator);
            assert_eq!(devices.play_animation(&ClipRef::new("broken", 1.0)), Some(1.0));
        }
    }

    #[test]
    fn test_clip_wait_is_never_shorter_than_authored() {
        let mut animator = RecordingAnimator::with_override(0.25);
        let mut devices = Devices::new().with_animator(&mut animator);
        assert_eq!(devices.play_animation(&ClipRef::new("short", 1.0)), Some(1.0));

        let mut animator = RecordingAnimator::with_override(4.0);
        let mut devices = Devices::new().with_animator(&mut animator);
        assert_eq!(devices.play_animation(&ClipRef::new("long", 1.0)), Some(4.0));
    }

    #[test]
    fn test_unbound_devices_are_skipped() {
        let mut devices = Devices::new();
        assert_eq!(devices.play_audio(&ClipRef::new("line", 1.0)), None);
        assert!(!devices.set_active(EntityId::new(), false));

        let mut visibility = RecordingVisibility::default();
        let entity = EntityId::new();
        let mut devices = Devices::new().with_visibility(&mut visibility);
        assert!(devices.set_active(entity, false));
        drop(devices);
        assert_eq!(visibility.calls, vec![(entity, false)]);
    }
}
