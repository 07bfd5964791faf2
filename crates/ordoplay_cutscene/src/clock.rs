// SPDX-License-Identifier: MIT OR Apache-2.0
//! Clock sources that drive scheduling turns.

use std::collections::VecDeque;
use std::time::Instant;

/// Supplies the time elapsed since the previous turn
pub trait Clock {
    /// Seconds since the last call. Never negative.
    fn tick(&mut self) -> f32;
}

/// Clock that advances by the same step every turn
#[derive(Debug, Clone, Copy)]
pub struct FixedStepClock {
    /// Seconds per turn
    pub step: f32,
}

impl FixedStepClock {
    /// Create a clock with the given step (clamped to zero)
    pub fn new(step: f32) -> Self {
        Self {
            step: step.max(0.0),
        }
    }

    /// A 60 Hz clock
    pub fn sixty_hz() -> Self {
        Self::new(1.0 / 60.0)
    }
}

impl Clock for FixedStepClock {
    fn tick(&mut self) -> f32 {
        self.step
    }
}

/// Clock that replays a list of deltas, then repeats a fallback
#[derive(Debug, Clone)]
pub struct ScriptedClock {
    deltas: VecDeque<f32>,
    fallback: f32,
}

impl ScriptedClock {
    /// Create a clock from explicit deltas
    pub fn new(deltas: impl IntoIterator<Item = f32>, fallback: f32) -> Self {
        Self {
            deltas: deltas.into_iter().collect(),
            fallback: fallback.max(0.0),
        }
    }

    /// Number of scripted deltas left
    pub fn remaining(&self) -> usize {
        self.deltas.len()
    }
}

impl Clock for ScriptedClock {
    fn tick(&mut self) -> f32 {
        self.deltas
            .pop_front()
            .map(|delta| delta.max(0.0))
            .unwrap_or(self.fallback)
    }
}

/// Wall-clock time, optionally scaled
#[derive(Debug, Clone)]
pub struct SystemClock {
    last: Instant,
    /// Time scale (1.0 = real time)
    pub time_scale: f32,
}

impl SystemClock {
    /// Start measuring from now
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            time_scale: 1.0,
        }
    }

    /// Set time scale (clamped to a reasonable range)
    pub fn with_time_scale(mut self, scale: f32) -> Self {
        self.time_scale = scale.clamp(0.0, 10.0);
        self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        delta * self.time_scale
    }
}
