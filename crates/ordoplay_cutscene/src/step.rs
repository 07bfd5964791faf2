// SPDX-License-Identifier: MIT OR Apache-2.0
//! Step coordination: fan out a step's tracks and decide when it is done.

use crate::action::SequenceAction;
use crate::binding::EntityId;
use crate::device::Devices;
use crate::error::DeviceKind;
use crate::event::SequenceEvent;
use crate::track::{TrackKind, TrackTask};

/// A launched track and whether the step blocks on it
#[derive(Debug)]
struct StepTrack {
    task: TrackTask,
    awaited: bool,
}

/// Runs the tracks of one step
#[derive(Debug)]
pub struct StepCoordinator {
    index: usize,
    /// Launched tracks, in `TrackKind::ORDER`
    tracks: Vec<StepTrack>,
    target_to_disable: Option<EntityId>,
    skipped: Vec<DeviceKind>,
}

impl StepCoordinator {
    /// Launch every configured track of `action`.
    ///
    /// Animation, audio and camera are started in that order within the same
    /// turn. Tracks whose device is unbound are skipped and reported as
    /// configuration errors; they never gate the step.
    pub fn launch(
        index: usize,
        action: &SequenceAction,
        camera_move_duration: f32,
        devices: &mut Devices<'_>,
        events: &mut Vec<SequenceEvent>,
    ) -> Self {
        let mut coordinator = Self {
            index,
            tracks: Vec::with_capacity(TrackKind::ORDER.len()),
            target_to_disable: action.target_to_disable(),
            skipped: Vec::new(),
        };
        events.push(SequenceEvent::StepStarted(index));
        tracing::debug!("Step {index} started");

        for kind in TrackKind::ORDER {
            let (task, awaited) = match kind {
                TrackKind::Animation => match &action.animation {
                    Some(clip) => (TrackTask::animation(clip.clone()), action.wait_for_animation),
                    None => continue,
                },
                TrackKind::Audio => match &action.audio {
                    Some(clip) => (TrackTask::audio(clip.clone()), action.wait_for_audio),
                    None => continue,
                },
                // Camera moves always gate the step
                TrackKind::Camera => match action.camera_range() {
                    Some(range) => (TrackTask::camera(range, camera_move_duration), true),
                    None => continue,
                },
            };
            coordinator.start_track(task, awaited, devices, events);
        }

        coordinator
    }

    fn start_track(
        &mut self,
        mut task: TrackTask,
        awaited: bool,
        devices: &mut Devices<'_>,
        events: &mut Vec<SequenceEvent>,
    ) {
        let kind = task.kind();
        if let Err(err) = task.start(devices) {
            tracing::warn!("Step {}: skipping {} track: {err}", self.index, kind.name());
            self.report_missing(kind.into(), events);
            return;
        }

        events.push(SequenceEvent::TrackStarted {
            step: self.index,
            kind,
            awaited,
        });
        if task.is_done() {
            events.push(SequenceEvent::TrackFinished {
                step: self.index,
                kind,
            });
        }
        self.tracks.push(StepTrack { task, awaited });
    }

    fn report_missing(&mut self, device: DeviceKind, events: &mut Vec<SequenceEvent>) {
        self.skipped.push(device);
        events.push(SequenceEvent::ConfigurationError {
            step: self.index,
            device,
        });
    }

    /// Step index within the sequence
    pub fn index(&self) -> usize {
        self.index
    }

    /// Devices that were missing when the step launched
    pub fn skipped(&self) -> &[DeviceKind] {
        &self.skipped
    }

    /// Kinds of the tracks that were launched
    pub fn launched(&self) -> impl Iterator<Item = TrackKind> + '_ {
        self.tracks.iter().map(|track| track.task.kind())
    }

    /// Kinds of the tracks the step waits for
    pub fn awaited(&self) -> impl Iterator<Item = TrackKind> + '_ {
        self.tracks
            .iter()
            .filter(|track| track.awaited)
            .map(|track| track.task.kind())
    }

    /// Advance every running track by `delta` seconds
    pub fn tick(&mut self, delta: f32, devices: &mut Devices<'_>, events: &mut Vec<SequenceEvent>) {
        for track in &mut self.tracks {
            if track.task.is_done() {
                continue;
            }
            if track.task.tick(delta, devices).is_done() {
                events.push(SequenceEvent::TrackFinished {
                    step: self.index,
                    kind: track.task.kind(),
                });
            }
        }
    }

    /// Whether every awaited track has finished.
    ///
    /// Checked animation first, then audio, then camera; a step with no
    /// awaited tracks is complete as soon as it launches.
    pub fn is_complete(&self) -> bool {
        self.tracks
            .iter()
            .filter(|track| track.awaited)
            .all(|track| track.task.is_done())
    }

    /// Run the end-of-step side effect and hand back unfinished tracks.
    ///
    /// Must only be called once [`is_complete`](Self::is_complete) holds.
    /// The returned tasks are fire-and-forget tracks that keep running
    /// after the step.
    pub fn finish(self, devices: &mut Devices<'_>, events: &mut Vec<SequenceEvent>) -> Vec<TrackTask> {
        debug_assert!(self.is_complete());

        if let Some(entity) = self.target_to_disable {
            if devices.set_active(entity, false) {
                tracing::debug!("Step {}: hid target {entity}", self.index);
                events.push(SequenceEvent::TargetHidden {
                    step: self.index,
                    entity,
                });
            } else {
                tracing::warn!(
                    "Step {}: cannot hide target {entity}: no visibility device bound",
                    self.index
                );
                events.push(SequenceEvent::ConfigurationError {
                    step: self.index,
                    device: DeviceKind::Visibility,
                });
            }
        }

        events.push(SequenceEvent::StepFinished(self.index));
        tracing::debug!("Step {} finished", self.index);

        self.tracks
            .into_iter()
            .filter(|track| !track.task.is_done())
            .map(|track| track.task)
            .collect()
    }
}
