// SPDX-License-Identifier: MIT OR Apache-2.0
//! Devices that log side effects instead of driving a real scene.

use ordoplay_cutscene::{
    AnimationDevice, AudioDevice, ClipRef, EntityId, TransformSink, Vec3, VisibilitySink,
};
use std::collections::HashSet;

/// Animator that logs every clip it is asked to play
#[derive(Debug, Default)]
pub struct LogAnimator {
    /// Clips played so far
    pub played: usize,
}

impl AnimationDevice for LogAnimator {
    fn play(&mut self, clip: &ClipRef) -> f32 {
        self.played += 1;
        tracing::info!("[animator] play '{}' ({:.2}s)", clip.name, clip.duration);
        clip.duration
    }
}

/// Audio source that logs every clip it is asked to play
#[derive(Debug, Default)]
pub struct LogAudio {
    /// Clips played so far
    pub played: usize,
}

impl AudioDevice for LogAudio {
    fn play(&mut self, clip: &ClipRef) -> f32 {
        self.played += 1;
        tracing::info!("[audio] play '{}' ({:.2}s)", clip.name, clip.duration);
        clip.duration
    }
}

/// Camera transform that keeps the last position
#[derive(Debug, Default)]
pub struct LogCamera {
    /// Last position written
    pub position: Vec3,
    /// Number of writes
    pub writes: usize,
}

impl TransformSink for LogCamera {
    fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.writes += 1;
        tracing::trace!("[camera] position {:?}", position);
    }
}

/// Visibility sink that tracks hidden entities
#[derive(Debug, Default)]
pub struct LogVisibility {
    /// Entities currently hidden
    pub hidden: HashSet<EntityId>,
}

impl VisibilitySink for LogVisibility {
    fn set_active(&mut self, entity: EntityId, active: bool) {
        if active {
            self.hidden.remove(&entity);
        } else {
            self.hidden.insert(entity);
        }
        tracing::info!("[scene] entity {entity} active = {active}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_devices_report_authored_duration() {
        let clip = ClipRef::new("wave", 1.25);
        let mut animator = LogAnimator::default();
        let mut audio = LogAudio::default();
        assert_eq!(animator.play(&clip), 1.25);
        assert_eq!(AudioDevice::play(&mut audio, &clip), 1.25);
        assert_eq!(animator.played, 1);
        assert_eq!(audio.played, 1);
    }

    #[test]
    fn test_visibility_tracks_hidden_entities() {
        let entity = EntityId::new();
        let mut visibility = LogVisibility::default();
        visibility.set_active(entity, false);
        assert!(visibility.hidden.contains(&entity));
        visibility.set_active(entity, true);
        assert!(visibility.hidden.is_empty());
    }

    #[test]
    fn test_camera_keeps_last_position() {
        let mut camera = LogCamera::default();
        camera.set_position([1.0, 2.0, 3.0]);
        camera.set_position([4.0, 5.0, 6.0]);
        assert_eq!(camera.position, [4.0, 5.0, 6.0]);
        assert_eq!(camera.writes, 2);
    }
}
