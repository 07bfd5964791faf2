// SPDX-License-Identifier: MIT OR Apache-2.0
//! Linear cutscene executor for `OrdoPlay`.
//!
//! A cutscene is an ordered list of steps. Each step can start:
//! - A character animation clip
//! - An audio clip
//! - A linear camera move
//!
//! The tracks of a step run concurrently; the step finishes once the tracks
//! it waits for are done, and then the next step starts.
//!
//! ## Architecture
//!
//! The executor is built on:
//! - Track tasks advanced once per scheduling turn
//! - A step coordinator that joins the awaited tracks
//! - A sequence scheduler that walks the steps in order
//! - Host capabilities (devices and a clock) injected by the embedder

pub mod action;
pub mod binding;
pub mod cancel;
pub mod clock;
pub mod config;
pub mod device;
pub mod error;
pub mod event;
pub mod interpolation;
pub mod runner;
pub mod scheduler;
pub mod step;
pub mod track;

#[cfg(test)]
pub(crate) mod test_support;

pub use action::{CameraRange, ClipRef, SequenceAction};
pub use binding::EntityId;
pub use cancel::CancellationToken;
pub use clock::{Clock, FixedStepClock, ScriptedClock, SystemClock};
pub use config::{
    SequenceConfig, DEFAULT_CAMERA_MOVE_DURATION, SEQUENCE_FILE_EXTENSION, SEQUENCE_FORMAT_VERSION,
};
pub use device::{AnimationDevice, AudioDevice, Devices, TransformSink, VisibilitySink};
pub use error::{CutsceneError, DeviceKind, Result};
pub use event::SequenceEvent;
pub use interpolation::{Interpolation, Vec3};
pub use runner::{run_until_settled, run_with, RunOutcome, RunReport};
pub use scheduler::{initialize, SchedulerState, SequenceScheduler};
pub use step::StepCoordinator;
pub use track::{CameraMove, TrackKind, TrackState, TrackTask};
