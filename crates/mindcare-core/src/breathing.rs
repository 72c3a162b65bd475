//! Guided breathing exercise.
//!
//! [`BreathingSession`] is a deterministic state machine: the caller feeds it
//! elapsed time and gets back the phase changes that happened. It has no
//! timers of its own.
//!
//! ```text
//! Idle -> Running(Inhale -> Hold -> Exhale -> Inhale ...) -> Finished
//!                  \-------------- cancel() --------------> Cancelled
//! ```
//!
//! [`spawn_breathing`] drives a session from a tokio task. Cancelling or
//! dropping the [`BreathingHandle`] aborts the task, so no phase change is
//! delivered after the exercise is dismissed.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::ValidationError;
use crate::storage::BreathingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathingPhase {
    Inhale,
    Hold,
    Exhale,
}

impl BreathingPhase {
    const ORDER: [BreathingPhase; 3] = [
        BreathingPhase::Inhale,
        BreathingPhase::Hold,
        BreathingPhase::Exhale,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BreathingPhase::Inhale => "Breathe In",
            BreathingPhase::Hold => "Hold",
            BreathingPhase::Exhale => "Breathe Out",
        }
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            BreathingPhase::Inhale => "Inhale slowly and deeply (1-2-3-4)",
            BreathingPhase::Hold => "Hold your breath (1-2-3-4-5-6-7)",
            BreathingPhase::Exhale => "Exhale completely (1-2-3-4-5-6-7-8)",
        }
    }
}

/// Phase durations for one breath.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreathingCycle {
    pub inhale: Duration,
    pub hold: Duration,
    pub exhale: Duration,
}

impl Default for BreathingCycle {
    fn default() -> Self {
        Self::from(&BreathingConfig::default())
    }
}

impl From<&BreathingConfig> for BreathingCycle {
    fn from(config: &BreathingConfig) -> Self {
        Self {
            inhale: Duration::from_secs(config.inhale_secs),
            hold: Duration::from_secs(config.hold_secs),
            exhale: Duration::from_secs(config.exhale_secs),
        }
    }
}

impl BreathingCycle {
    pub fn duration_of(&self, phase: BreathingPhase) -> Duration {
        match phase {
            BreathingPhase::Inhale => self.inhale,
            BreathingPhase::Hold => self.hold,
            BreathingPhase::Exhale => self.exhale,
        }
    }

    pub fn total(&self) -> Duration {
        self.inhale + self.hold + self.exhale
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum BreathingState {
    Idle,
    Running { cycle: u32, phase: BreathingPhase },
    Finished,
    Cancelled,
}

/// Entered a new phase. `cycle` counts from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseChange {
    pub cycle: u32,
    pub phase: BreathingPhase,
    pub label: &'static str,
    pub instruction: &'static str,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BreathingUpdate {
    Phase(PhaseChange),
    Finished { cycles: u32 },
}

#[derive(Debug, Clone)]
pub struct BreathingSession {
    timing: BreathingCycle,
    cycles: u32,
    state: BreathingState,
    phase_remaining: Duration,
}

impl BreathingSession {
    /// # Errors
    /// Rejects zero cycles and a cycle with no time in it; such an exercise
    /// would end without ever running.
    pub fn new(timing: BreathingCycle, cycles: u32) -> Result<Self, ValidationError> {
        if cycles == 0 {
            return Err(ValidationError::InvalidValue {
                field: "breathing.cycles".into(),
                message: "must be at least 1".into(),
            });
        }
        if timing.total().is_zero() {
            return Err(ValidationError::InvalidValue {
                field: "breathing".into(),
                message: "inhale, hold and exhale cannot all be 0 seconds".into(),
            });
        }
        Ok(Self {
            timing,
            cycles,
            state: BreathingState::Idle,
            phase_remaining: Duration::ZERO,
        })
    }

    pub fn from_config(config: &BreathingConfig) -> Result<Self, ValidationError> {
        Self::new(BreathingCycle::from(config), config.cycles)
    }

    pub fn state(&self) -> BreathingState {
        self.state
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Time left in the current phase.
    pub fn phase_remaining(&self) -> Duration {
        self.phase_remaining
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, BreathingState::Finished | BreathingState::Cancelled)
    }

    /// Enter the first phase. Only valid from `Idle`.
    pub fn start(&mut self) -> Vec<BreathingUpdate> {
        if self.state != BreathingState::Idle {
            return Vec::new();
        }
        let change = self.enter(0, BreathingPhase::Inhale);
        match change {
            Some(change) => vec![BreathingUpdate::Phase(change)],
            None => self.step_forward().into_iter().collect(),
        }
    }

    /// Feed elapsed time; returns every phase change it caused, in order.
    pub fn advance(&mut self, by: Duration) -> Vec<BreathingUpdate> {
        let mut updates = Vec::new();
        let mut left = by;
        while matches!(self.state, BreathingState::Running { .. }) {
            if left < self.phase_remaining {
                self.phase_remaining -= left;
                break;
            }
            left -= self.phase_remaining;
            self.phase_remaining = Duration::ZERO;
            if let Some(update) = self.step_forward() {
                updates.push(update);
            }
        }
        updates
    }

    /// Stop the exercise. Returns false if it had already ended.
    pub fn cancel(&mut self) -> bool {
        if self.is_done() {
            return false;
        }
        self.state = BreathingState::Cancelled;
        self.phase_remaining = Duration::ZERO;
        true
    }

    /// Move to the next non-empty phase, or finish after the last cycle.
    fn step_forward(&mut self) -> Option<BreathingUpdate> {
        let BreathingState::Running {
            mut cycle,
            mut phase,
        } = self.state
        else {
            return None;
        };
        loop {
            phase = match phase {
                BreathingPhase::Inhale => BreathingPhase::Hold,
                BreathingPhase::Hold => BreathingPhase::Exhale,
                BreathingPhase::Exhale => {
                    cycle += 1;
                    BreathingPhase::Inhale
                }
            };
            if cycle >= self.cycles {
                self.state = BreathingState::Finished;
                tracing::debug!(cycles = self.cycles, "breathing exercise finished");
                return Some(BreathingUpdate::Finished {
                    cycles: self.cycles,
                });
            }
            if let Some(change) = self.enter(cycle, phase) {
                return Some(BreathingUpdate::Phase(change));
            }
        }
    }

    fn enter(&mut self, cycle: u32, phase: BreathingPhase) -> Option<PhaseChange> {
        let length = self.timing.duration_of(phase);
        self.state = BreathingState::Running { cycle, phase };
        if length.is_zero() {
            return None;
        }
        self.phase_remaining = length;
        Some(PhaseChange {
            cycle: cycle + 1,
            phase,
            label: phase.label(),
            instruction: phase.instruction(),
            duration_ms: length.as_millis() as u64,
        })
    }
}

/// A breathing session running on the tokio runtime.
pub struct BreathingHandle {
    updates: mpsc::UnboundedReceiver<BreathingUpdate>,
    task: JoinHandle<()>,
}

impl BreathingHandle {
    /// Next phase change, or `None` once the session ended or was cancelled.
    pub async fn next(&mut self) -> Option<BreathingUpdate> {
        self.updates.recv().await
    }

    /// Abort the driver task. Updates not yet received are discarded.
    pub fn cancel(&mut self) {
        self.task.abort();
        self.updates.close();
        while self.updates.try_recv().is_ok() {}
    }
}

impl Drop for BreathingHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Run `session` in real time on a spawned task.
///
/// Must be called from within a tokio runtime.
pub fn spawn_breathing(mut session: BreathingSession) -> BreathingHandle {
    let (tx, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(async move {
        for update in session.start() {
            if tx.send(update).is_err() {
                return;
            }
        }
        while !session.is_done() {
            let wait = session.phase_remaining();
            tokio::time::sleep(wait).await;
            for update in session.advance(wait) {
                if tx.send(update).is_err() {
                    return;
                }
            }
        }
    });
    BreathingHandle { updates: rx, task }
}
