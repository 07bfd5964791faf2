// SPDX-License-Identifier: MIT OR Apache-2.0
//! Track tasks: the units of work a step runs in parallel.
//!
//! Each task is a small state machine (`NotStarted -> Running -> Done`)
//! advanced by the scheduler once per turn. Animation and audio tasks start
//! playback and then wait out the clip; camera tasks interpolate the camera
//! transform every turn until the move duration is reached.

use crate::action::{CameraRange, ClipRef};
use crate::device::Devices;
use crate::error::{CutsceneError, DeviceKind};
use crate::interpolation::{Interpolation, Vec3};

/// Kind of track within a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    /// Character animation
    Animation,
    /// Audio cue
    Audio,
    /// Camera move
    Camera,
}

impl TrackKind {
    /// Launch and completion-check order within a step
    pub const ORDER: [TrackKind; 3] = [Self::Animation, Self::Audio, Self::Camera];

    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Animation => "Animation",
            Self::Audio => "Audio",
            Self::Camera => "Camera",
        }
    }
}

/// Lifecycle of a track task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// Created but not launched
    #[default]
    NotStarted,
    /// Launched and still running
    Running,
    /// Ran to completion
    Done,
}

impl TrackState {
    /// Check if the task ran to completion
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Linear camera move, advanced one turn at a time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMove {
    /// Start position
    pub start: Vec3,
    /// End position
    pub end: Vec3,
    /// Seconds elapsed since the move started
    pub elapsed: f32,
    /// Total move length in seconds
    pub duration: f32,
}

impl CameraMove {
    /// Create a move over `duration` seconds
    pub fn new(range: CameraRange, duration: f32) -> Self {
        Self {
            start: range.start,
            end: range.end,
            elapsed: 0.0,
            duration,
        }
    }

    /// Whether the elapsed time has reached the duration
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Interpolated position for the current elapsed time
    pub fn position(&self) -> Vec3 {
        if self.is_finished() {
            return self.end;
        }
        let t = self.elapsed / self.duration;
        Interpolation::lerp_vec3(self.start, self.end, t)
    }
}

#[derive(Debug, Clone)]
enum TrackBody {
    /// Play a clip, then wait for it to run out
    Clip {
        clip: ClipRef,
        elapsed: f32,
        duration: f32,
    },
    /// Interpolate the camera transform
    Camera(CameraMove),
}

/// A single track of a step
#[derive(Debug, Clone)]
pub struct TrackTask {
    kind: TrackKind,
    state: TrackState,
    body: TrackBody,
}

impl TrackTask {
    /// Create an animation task
    pub fn animation(clip: ClipRef) -> Self {
        Self::clip(TrackKind::Animation, clip)
    }

    /// Create an audio task
    pub fn audio(clip: ClipRef) -> Self {
        Self::clip(TrackKind::Audio, clip)
    }

    /// Create a camera move task
    pub fn camera(range: CameraRange, duration: f32) -> Self {
        Self {
            kind: TrackKind::Camera,
            state: TrackState::NotStarted,
            body: TrackBody::Camera(CameraMove::new(range, duration)),
        }
    }

    fn clip(kind: TrackKind, clip: ClipRef) -> Self {
        let duration = clip.duration;
        Self {
            kind,
            state: TrackState::NotStarted,
            body: TrackBody::Clip {
                clip,
                elapsed: 0.0,
                duration,
            },
        }
    }

    /// Track kind
    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    /// Current lifecycle state
    pub fn state(&self) -> TrackState {
        self.state
    }

    /// Whether the task ran to completion
    pub fn is_done(&self) -> bool {
        self.state == TrackState::Done
    }

    /// Seconds the task has been running
    pub fn elapsed(&self) -> f32 {
        match &self.body {
            TrackBody::Clip { elapsed, .. } => *elapsed,
            TrackBody::Camera(camera_move) => camera_move.elapsed,
        }
    }

    /// Seconds the task runs for in total
    pub fn duration(&self) -> f32 {
        match &self.body {
            TrackBody::Clip { duration, .. } => *duration,
            TrackBody::Camera(camera_move) => camera_move.duration,
        }
    }

    /// The camera move, for camera tasks
    pub fn camera_move(&self) -> Option<&CameraMove> {
        match &self.body {
            TrackBody::Camera(camera_move) => Some(camera_move),
            TrackBody::Clip { .. } => None,
        }
    }

    /// Launch the task.
    ///
    /// Fires the start side effect (clip playback or the first camera write)
    /// and moves to `Running`, or straight to `Done` for zero-length work.
    /// Fails without side effects if the device it needs is unbound.
    pub fn start(&mut self, devices: &mut Devices<'_>) -> Result<TrackState, CutsceneError> {
        if self.state != TrackState::NotStarted {
            return Ok(self.state);
        }
        devices.require(DeviceKind::from(self.kind))?;

        match &mut self.body {
            TrackBody::Clip { clip, duration, .. } => {
                let played = match self.kind {
                    TrackKind::Animation => devices.play_animation(clip),
                    _ => devices.play_audio(clip),
                };
                *duration = played.ok_or(CutsceneError::MissingDevice(self.kind.into()))?;
                tracing::debug!("{} '{}' started ({:.3}s)", self.kind.name(), clip.name, duration);
            }
            TrackBody::Camera(camera_move) => {
                devices.set_camera_position(camera_move.position());
                tracing::debug!(
                    "Camera move {:?} -> {:?} started ({:.3}s)",
                    camera_move.start,
                    camera_move.end,
                    camera_move.duration
                );
            }
        }

        self.state = TrackState::Running;
        self.check_finished();
        Ok(self.state)
    }

    /// Advance a running task by `delta` seconds
    pub fn tick(&mut self, delta: f32, devices: &mut Devices<'_>) -> TrackState {
        if self.state != TrackState::Running {
            return self.state;
        }

        match &mut self.body {
            TrackBody::Clip { elapsed, .. } => {
                *elapsed += delta;
            }
            TrackBody::Camera(camera_move) => {
                camera_move.elapsed += delta;
                if !camera_move.is_finished() {
                    let position = camera_move.position();
                    tracing::trace!("Camera at {:?} (t = {:.3})", position, camera_move.elapsed);
                    devices.set_camera_position(position);
                }
            }
        }

        self.check_finished();
        if self.state == TrackState::Done {
            if let TrackBody::Camera(camera_move) = &self.body {
                // Write the exact endpoint rather than the last interpolated value
                devices.set_camera_position(camera_move.end);
            }
        }
        self.state
    }

    fn check_finished(&mut self) {
        let finished = match &self.body {
            TrackBody::Clip {
                elapsed, duration, ..
            } => elapsed >= duration,
            TrackBody::Camera(camera_move) => camera_move.is_finished(),
        };
        if finished {
            self.state = TrackState::Done;
            tracing::debug!("{} track finished", self.kind.name());
        }
    }
}
