// SPDX-License-Identifier: MIT OR Apache-2.0
//! `OrdoPlay` cutscene player.
//!
//! Loads a sequence file and plays it against logging devices:
//! - Simulated fixed-step clock (default) or wall-clock playback
//! - Optional cancellation after a given time
//! - Sample sequence generation for authoring

mod devices;

use clap::Parser;
use devices::{LogAnimator, LogAudio, LogCamera, LogVisibility};
use ordoplay_cutscene::{
    initialize, run_with, Clock, ClipRef, CutsceneError, Devices, EntityId, FixedStepClock,
    RunOutcome, RunReport, SequenceAction, SequenceConfig, SystemClock,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Command-line options
#[derive(Debug, clap::Parser)]
#[command(name = "cutscene_player", version, about = "Play an OrdoPlay cutscene sequence")]
struct Opts {
    /// Path to the sequence file (RON)
    path: PathBuf,

    /// Seconds per turn for the simulated clock
    #[arg(long, default_value_t = 1.0 / 60.0)]
    step: f32,

    /// Follow the wall clock instead of simulating
    #[arg(long)]
    realtime: bool,

    /// Playback speed for real-time mode
    #[arg(long, default_value_t = 1.0)]
    time_scale: f32,

    /// Give up after this many turns
    #[arg(long, default_value_t = 1_000_000)]
    max_turns: u64,

    /// Cancel the sequence once this many seconds have passed
    #[arg(long)]
    cancel_after: Option<f64>,

    /// Write an example sequence to PATH instead of playing it
    #[arg(long)]
    write_sample: bool,

    /// Log every recorded sequence event when done
    #[arg(long)]
    events: bool,
}

/// Player errors
#[derive(Debug, Error)]
enum PlayerError {
    /// Loading or validating the sequence failed
    #[error(transparent)]
    Cutscene(#[from] CutsceneError),

    /// A command-line value is out of range
    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("ordoplay_cutscene=debug,cutscene_player=info")
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let opts = Opts::parse();

    let result = if opts.write_sample {
        write_sample(&opts.path)
    } else {
        play(&opts).map(|report| {
            tracing::info!(
                "Finished: {:?} after {} turns ({:.3}s)",
                report.outcome,
                report.turns,
                report.elapsed
            );
        })
    };

    if let Err(e) = result {
        tracing::error!("Cutscene player failed: {e}");
        std::process::exit(1);
    }
}

fn play(opts: &Opts) -> Result<RunReport, PlayerError> {
    if !opts.realtime && !(opts.step.is_finite() && opts.step > 0.0) {
        return Err(PlayerError::InvalidOption(format!(
            "--step must be a positive number of seconds, got {}",
            opts.step
        )));
    }

    let config = SequenceConfig::load(&opts.path)?;
    let mut scheduler = initialize(config)?;
    let token = scheduler.cancellation_token();

    let mut animator = LogAnimator::default();
    let mut audio = LogAudio::default();
    let mut camera = LogCamera::default();
    let mut visibility = LogVisibility::default();
    let mut devices = Devices::new()
        .with_animator(&mut animator)
        .with_audio(&mut audio)
        .with_camera(&mut camera)
        .with_visibility(&mut visibility);

    let mut clock: Box<dyn Clock> = if opts.realtime {
        Box::new(SystemClock::new().with_time_scale(opts.time_scale))
    } else {
        Box::new(FixedStepClock::new(opts.step))
    };

    let report = run_with(
        &mut scheduler,
        clock.as_mut(),
        &mut devices,
        opts.max_turns,
        |_, elapsed| {
            if opts.cancel_after.is_some_and(|limit| elapsed >= limit) && !token.is_cancelled() {
                tracing::info!("Cancelling after {elapsed:.3}s");
                token.cancel();
            }
            if opts.realtime {
                std::thread::sleep(Duration::from_millis(8));
            }
        },
    );
    drop(devices);

    if opts.events {
        for event in scheduler.take_events() {
            tracing::info!("{event:?}");
        }
    }

    tracing::info!(
        "Played {} animation(s), {} audio clip(s), {} camera write(s); {} entit(ies) hidden",
        animator.played,
        audio.played,
        camera.writes,
        visibility.hidden.len()
    );
    if report.outcome == RunOutcome::Completed && camera.writes > 0 {
        tracing::info!("Camera resting at {:?}", camera.position);
    }

    Ok(report)
}

/// Example sequence covering each track kind
fn sample_sequence() -> SequenceConfig {
    let door = EntityId::new();
    SequenceConfig::new("Sample")
        .with_step(
            SequenceAction::new()
                .with_animation(ClipRef::new("hero_walk_in", 1.5))
                .waiting_for_animation()
                .with_camera([0.0, 1.8, -6.0], [0.0, 1.8, -3.0]),
        )
        .with_step(
            SequenceAction::new()
                .with_audio(ClipRef::new("hero_line_01", 2.0))
                .waiting_for_audio(),
        )
        .with_step(
            SequenceAction::new()
                .with_animation(ClipRef::new("hero_open_door", 1.0))
                .waiting_for_animation()
                .with_audio(ClipRef::new("door_creak", 3.0))
                .with_target(door)
                .disabling_target(),
        )
        .with_step(SequenceAction::new().with_camera([0.0, 1.8, -3.0], [2.0, 2.5, 1.0]))
}

fn write_sample(path: &Path) -> Result<(), PlayerError> {
    sample_sequence().save(path)?;
    tracing::info!("Wrote sample sequence to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_sequence_is_valid() {
        let sample = sample_sequence();
        assert!(sample.validate().is_ok());
        assert_eq!(sample.steps.len(), 4);
        assert!(sample.steps.iter().all(|step| !step.is_empty()));
    }

    #[test]
    fn test_sample_round_trips_through_file() {
        let path = std::env::temp_dir().join(format!("cutscene_player_{}.cutscene", uuid::Uuid::new_v4()));
        write_sample(&path).unwrap();
        let loaded = SequenceConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.name, "Sample");
        assert_eq!(loaded.steps.len(), 4);
    }

    #[test]
    fn test_cli_defaults() {
        let opts = Opts::try_parse_from(["cutscene_player", "intro.cutscene"]).unwrap();
        assert_eq!(opts.path, PathBuf::from("intro.cutscene"));
        assert!(!opts.realtime);
        assert!(opts.cancel_after.is_none());
        assert!((opts.step - 1.0 / 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_play_rejects_bad_step() {
        let opts = Opts::try_parse_from(["cutscene_player", "intro.cutscene", "--step", "0"]).unwrap();
        assert!(matches!(play(&opts), Err(PlayerError::InvalidOption(_))));
    }

    #[test]
    fn test_play_sample_to_completion() {
        let path = std::env::temp_dir().join(format!("cutscene_player_{}.cutscene", uuid::Uuid::new_v4()));
        write_sample(&path).unwrap();
        let opts = Opts::try_parse_from([
            "cutscene_player".to_string(),
            path.display().to_string(),
            "--step".to_string(),
            "0.1".to_string(),
        ])
        .unwrap();
        let report = play(&opts).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(report.outcome, RunOutcome::Completed);
    }

    #[test]
    fn test_play_cancel_after() {
        let path = std::env::temp_dir().join(format!("cutscene_player_{}.cutscene", uuid::Uuid::new_v4()));
        write_sample(&path).unwrap();
        let opts = Opts::try_parse_from([
            "cutscene_player".to_string(),
            path.display().to_string(),
            "--step".to_string(),
            "0.25".to_string(),
            "--cancel-after".to_string(),
            "1.0".to_string(),
        ])
        .unwrap();
        let report = play(&opts).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(report.outcome, RunOutcome::Cancelled);
    }
}
