// SPDX-License-Identifier: MIT OR Apache-2.0
//! Driver loop that feeds clock ticks into a scheduler.

use crate::clock::Clock;
use crate::device::Devices;
use crate::scheduler::{SchedulerState, SequenceScheduler};

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every step finished and no background track is left
    Completed,
    /// The sequence was cancelled
    Cancelled,
    /// The turn limit was reached first
    TurnLimit,
}

/// Summary of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunReport {
    /// Turns executed (not counting the start)
    pub turns: u64,
    /// Clock time consumed, in seconds
    pub elapsed: f64,
    /// Why the run stopped
    pub outcome: RunOutcome,
}

/// Run `scheduler` until it settles, is cancelled, or `max_turns` pass
pub fn run_until_settled(
    scheduler: &mut SequenceScheduler,
    clock: &mut dyn Clock,
    devices: &mut Devices<'_>,
    max_turns: u64,
) -> RunReport {
    run_with(scheduler, clock, devices, max_turns, |_, _| {})
}

/// Like [`run_until_settled`], calling `on_turn` after every turn.
///
/// The hook sees the scheduler and the total elapsed time; hosts use it to
/// pace real-time playback or to cancel through a
/// [`CancellationToken`](crate::CancellationToken).
pub fn run_with(
    scheduler: &mut SequenceScheduler,
    clock: &mut dyn Clock,
    devices: &mut Devices<'_>,
    max_turns: u64,
    mut on_turn: impl FnMut(&SequenceScheduler, f64),
) -> RunReport {
    if scheduler.state() == SchedulerState::Idle {
        scheduler.start(devices);
    }

    let mut turns = 0;
    let mut elapsed = 0.0_f64;
    loop {
        if let SchedulerState::Cancelled(_) = scheduler.state() {
            return RunReport {
                turns,
                elapsed,
                outcome: RunOutcome::Cancelled,
            };
        }
        if scheduler.is_settled() {
            return RunReport {
                turns,
                elapsed,
                outcome: RunOutcome::Completed,
            };
        }
        if turns >= max_turns {
            tracing::warn!(
                "Sequence '{}' stopped after {turns} turns ({})",
                scheduler.name(),
                scheduler.state().status_text()
            );
            return RunReport {
                turns,
                elapsed,
                outcome: RunOutcome::TurnLimit,
            };
        }

        let delta = clock.tick();
        scheduler.tick(delta, devices);
        turns += 1;
        elapsed += f64::from(delta);
        on_turn(scheduler, elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ClipRef, SequenceAction};
    use crate::clock::{FixedStepClock, ScriptedClock};
    use crate::event::SequenceEvent;
    use crate::test_support::{RecordingAnimator, RecordingAudio};

    #[test]
    fn test_runs_to_completion() {
        let mut animator = RecordingAnimator::default();
        let mut audio = RecordingAudio::default();
        let mut devices = Devices::new().with_animator(&mut animator).with_audio(&mut audio);

        let steps = vec![
            SequenceAction::new().with_animation(ClipRef::new("intro", 1.0)).waiting_for_animation(),
            SequenceAction::new().with_audio(ClipRef::new("sting", 0.5)),
        ];
        let mut scheduler = SequenceScheduler::new(steps, 2.0);
        let mut clock = FixedStepClock::new(0.25);

        let report = run_until_settled(&mut scheduler, &mut clock, &mut devices, 1000);
        assert_eq!(report.outcome, RunOutcome::Completed);
        // 4 turns for the animation, 2 more for the background audio
        assert_eq!(report.turns, 6);
        assert_eq!(report.elapsed, 1.5);
    }

    #[test]
    fn test_turn_limit() {
        let mut animator = RecordingAnimator::default();
        let mut devices = Devices::new().with_animator(&mut animator);

        let steps = vec![SequenceAction::new()
            .with_animation(ClipRef::new("long", 100.0))
            .waiting_for_animation()];
        let mut scheduler = SequenceScheduler::new(steps, 2.0);
        let mut clock = FixedStepClock::new(0.5);

        let report = run_until_settled(&mut scheduler, &mut clock, &mut devices, 10);
        assert_eq!(report.outcome, RunOutcome::TurnLimit);
        assert_eq!(report.turns, 10);
        assert_eq!(scheduler.state(), SchedulerState::Running(0));
    }

    #[test]
    fn test_hook_can_cancel() {
        let mut animator = RecordingAnimator::default();
        let mut devices = Devices::new().with_animator(&mut animator);

        let steps = vec![SequenceAction::new()
            .with_animation(ClipRef::new("long", 100.0))
            .waiting_for_animation()];
        let mut scheduler = SequenceScheduler::new(steps, 2.0);
        let token = scheduler.cancellation_token();
        let mut clock = ScriptedClock::new([1.0, 1.0, 1.0], 1.0);

        let report = run_with(&mut scheduler, &mut clock, &mut devices, 100, |_, elapsed| {
            if elapsed >= 2.0 {
                token.cancel();
            }
        });
        assert_eq!(report.outcome, RunOutcome::Cancelled);
        assert_eq!(report.turns, 3);
        assert!(scheduler
            .take_events()
            .contains(&SequenceEvent::Cancelled { step: 0 }));
    }

    #[test]
    fn test_empty_sequence_needs_no_turns() {
        let mut scheduler = SequenceScheduler::new(Vec::new(), 2.0);
        let mut clock = FixedStepClock::sixty_hz();
        let report = run_until_settled(&mut scheduler, &mut clock, &mut Devices::new(), 10);
        assert_eq!(report.outcome, RunOutcome::Completed);
        assert_eq!(report.turns, 0);
    }
}
