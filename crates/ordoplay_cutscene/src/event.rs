// SPDX-License-Identifier: MIT OR Apache-2.0
//! Events recorded while a sequence plays.

use crate::binding::EntityId;
use crate::error::DeviceKind;
use crate::track::TrackKind;

/// Something observable that happened during playback
#[derive(Debug, Clone, PartialEq)]
pub enum SequenceEvent {
    /// The scheduler left `Idle`
    SequenceStarted {
        /// Number of steps in the sequence
        steps: usize,
    },
    /// A step coordinator was launched
    StepStarted(usize),
    /// A track task was launched
    TrackStarted {
        /// Owning step
        step: usize,
        /// Track kind
        kind: TrackKind,
        /// Whether the step waits for it
        awaited: bool,
    },
    /// A track task ran to completion
    TrackFinished {
        /// Owning step
        step: usize,
        /// Track kind
        kind: TrackKind,
    },
    /// A track or side effect was skipped because its device is unbound
    ConfigurationError {
        /// Owning step
        step: usize,
        /// Missing device
        device: DeviceKind,
    },
    /// The step's target was hidden
    TargetHidden {
        /// Owning step
        step: usize,
        /// Hidden entity
        entity: EntityId,
    },
    /// All awaited tracks of a step finished
    StepFinished(usize),
    /// The last step finished
    SequenceComplete,
    /// Playback was aborted
    Cancelled {
        /// Step that was running
        step: usize,
    },
}
