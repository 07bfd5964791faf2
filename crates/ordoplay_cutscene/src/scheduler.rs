// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sequence scheduler: walks the steps of a cutscene in order.
//!
//! The scheduler owns the step list and the current index. Every turn it
//! advances the running step's tracks, and as soon as the step's awaited
//! tracks are done it hides the target (if configured), moves to the next
//! index and launches the next step in the same turn. Steps never overlap;
//! only the tracks inside a step run concurrently.

use crate::action::SequenceAction;
use crate::cancel::CancellationToken;
use crate::config::{SequenceConfig, DEFAULT_CAMERA_MOVE_DURATION};
use crate::device::Devices;
use crate::error::Result;
use crate::event::SequenceEvent;
use crate::step::StepCoordinator;
use crate::track::TrackTask;

/// Scheduler lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerState {
    /// Not started yet
    #[default]
    Idle,
    /// Running the step at this index
    Running(usize),
    /// All steps finished
    Complete,
    /// Aborted while at this index
    Cancelled(usize),
}

impl SchedulerState {
    /// Whether no further steps will launch
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Cancelled(_))
    }

    /// Get a status string for display
    pub fn status_text(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Running(_) => "Running",
            Self::Complete => "Complete",
            Self::Cancelled(_) => "Cancelled",
        }
    }
}

/// Fire-and-forget track left running by a finished step
#[derive(Debug)]
struct BackgroundTrack {
    step: usize,
    task: TrackTask,
}

/// Drives a sequence of steps
#[derive(Debug)]
pub struct SequenceScheduler {
    name: String,
    steps: Vec<SequenceAction>,
    camera_move_duration: f32,
    current_index: usize,
    state: SchedulerState,
    current: Option<StepCoordinator>,
    background: Vec<BackgroundTrack>,
    cancel: CancellationToken,
    launches: usize,
    /// Events recorded since the last `take_events`
    pending_events: Vec<SequenceEvent>,
}

/// Validate `config` and build an idle scheduler for it
pub fn initialize(config: SequenceConfig) -> Result<SequenceScheduler> {
    config.validate()?;
    tracing::info!(
        "Loaded sequence '{}' ({} steps, camera moves {:.2}s)",
        config.name,
        config.steps.len(),
        config.camera_move_duration
    );
    let mut scheduler = SequenceScheduler::new(config.steps, config.camera_move_duration);
    scheduler.name = config.name;
    Ok(scheduler)
}

impl SequenceScheduler {
    /// Create an idle scheduler without validating the steps.
    ///
    /// A negative or non-finite `camera_move_duration` is clamped to 0.
    pub fn new(steps: Vec<SequenceAction>, camera_move_duration: f32) -> Self {
        let valid = camera_move_duration.is_finite() && camera_move_duration >= 0.0;
        let camera_move_duration = if valid {
            camera_move_duration
        } else {
            tracing::warn!("Invalid camera move duration {camera_move_duration}, using 0");
            0.0
        };
        Self {
            name: String::new(),
            steps,
            camera_move_duration,
            current_index: 0,
            state: SchedulerState::Idle,
            current: None,
            background: Vec::new(),
            cancel: CancellationToken::new(),
            launches: 0,
            pending_events: Vec::new(),
        }
    }

    /// Use `token` for cancellation instead of the scheduler's own
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Handle that can cancel this scheduler
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Sequence name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All steps
    pub fn steps(&self) -> &[SequenceAction] {
        &self.steps
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the sequence has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Camera move length in seconds
    pub fn camera_move_duration(&self) -> f32 {
        self.camera_move_duration
    }

    /// Index of the step being run (equals `len()` once complete)
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Current lifecycle state
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// The running step, if any
    pub fn current_step(&self) -> Option<&StepCoordinator> {
        self.current.as_ref()
    }

    /// Number of step launches so far
    pub fn launch_count(&self) -> usize {
        self.launches
    }

    /// Fire-and-forget tracks still running
    pub fn background_tracks(&self) -> usize {
        self.background.len()
    }

    /// Whether no further steps will launch
    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Finished, and no fire-and-forget track is still running
    pub fn is_settled(&self) -> bool {
        self.is_finished() && self.background.is_empty()
    }

    /// Drain the recorded events
    pub fn take_events(&mut self) -> Vec<SequenceEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Start the sequence from step 0.
    ///
    /// Empty leading steps complete immediately, so this may run several
    /// steps (or the whole sequence) before returning.
    pub fn start(&mut self, devices: &mut Devices<'_>) {
        match self.state {
            SchedulerState::Idle => {
                if self.check_cancelled() {
                    return;
                }
                tracing::info!("Starting sequence '{}' ({} steps)", self.name, self.steps.len());
                self.current_index = 0;
                self.pending_events.push(SequenceEvent::SequenceStarted {
                    steps: self.steps.len(),
                });
                self.execute_current(devices);
                self.settle(devices);
            }
            SchedulerState::Running(index) => {
                tracing::warn!("Sequence already running at step {index}, ignoring start");
            }
            SchedulerState::Complete | SchedulerState::Cancelled(_) => {
                tracing::debug!("Sequence already {}, ignoring start", self.state.status_text());
            }
        }
    }

    /// Run one scheduling turn that lasted `delta` seconds
    pub fn tick(&mut self, delta: f32, devices: &mut Devices<'_>) {
        if self.check_cancelled() {
            return;
        }

        self.tick_background(delta, devices);

        if let Some(step) = self.current.as_mut() {
            step.tick(delta, devices, &mut self.pending_events);
            self.settle(devices);
        }
    }

    /// Abort the sequence. No-op once complete.
    pub fn cancel(&mut self) {
        self.cancel.cancel();
        self.check_cancelled();
    }

    fn tick_background(&mut self, delta: f32, devices: &mut Devices<'_>) {
        let events = &mut self.pending_events;
        self.background.retain_mut(|track| {
            if track.task.tick(delta, devices).is_done() {
                tracing::debug!("Step {}: background {} track finished", track.step, track.task.kind().name());
                events.push(SequenceEvent::TrackFinished {
                    step: track.step,
                    kind: track.task.kind(),
                });
                false
            } else {
                true
            }
        });
    }

    /// Advance past every step whose awaited tracks are done
    fn settle(&mut self, devices: &mut Devices<'_>) {
        while self.current.as_ref().is_some_and(StepCoordinator::is_complete) {
            if self.check_cancelled() {
                return;
            }
            let Some(step) = self.current.take() else {
                break;
            };
            let index = step.index();
            let detached = step.finish(devices, &mut self.pending_events);
            self.background
                .extend(detached.into_iter().map(|task| BackgroundTrack { step: index, task }));

            self.current_index += 1;
            self.execute_current(devices);
        }
    }

    /// Launch the step at `current_index`, or finish the sequence
    fn execute_current(&mut self, devices: &mut Devices<'_>) {
        if self.check_cancelled() {
            return;
        }

        if self.current_index >= self.steps.len() {
            self.state = SchedulerState::Complete;
            self.pending_events.push(SequenceEvent::SequenceComplete);
            tracing::info!("Sequence execution complete.");
            return;
        }

        let index = self.current_index;
        self.state = SchedulerState::Running(index);
        self.launches += 1;
        let step = StepCoordinator::launch(
            index,
            &self.steps[index],
            self.camera_move_duration,
            devices,
            &mut self.pending_events,
        );
        self.current = Some(step);
    }

    /// Move to `Cancelled` if the token is set. Returns true if cancelled.
    fn check_cancelled(&mut self) -> bool {
        match self.state {
            SchedulerState::Cancelled(_) => true,
            SchedulerState::Complete => false,
            SchedulerState::Idle | SchedulerState::Running(_) => {
                if !self.cancel.is_cancelled() {
                    return false;
                }
                let step = self.current_index;
                self.state = SchedulerState::Cancelled(step);
                self.current = None;
                self.background.clear();
                self.pending_events.push(SequenceEvent::Cancelled { step });
                tracing::info!("Sequence '{}' cancelled at step {step}", self.name);
                true
            }
        }
    }
}

impl Default for SequenceScheduler {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_CAMERA_MOVE_DURATION)
    }
}
