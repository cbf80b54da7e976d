//! Cadence regulation for the pedometer
//!
//! Candidate crossings become steps only when they arrive at a human walking
//! cadence and keep doing so. The first `regulation_threshold` consecutive
//! in-cadence candidates are held back and then credited together; every
//! further one is credited on its own. An out-of-cadence candidate starts the
//! count over.

use log::{debug, trace};

use crate::types::{CadenceState, PedometerSettings};

/// Outcome of one candidate crossing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Outside the cadence window; regulation restarted
    Rejected,
    /// In cadence but below the regulation threshold; nothing credited yet
    Accrued,
    /// In cadence; this many steps were credited
    Credited(u32),
}

/// Cadence regulator
///
/// Owns the cumulative step count. Positions are raw-sample indices within a
/// batch; the gap between two candidates adds `batch_stride` for every
/// batch boundary between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CadenceRegulator {
    /// Positional stride of one batch
    batch_stride: usize,
    /// Cadence upper bound in batches
    max_batches_since_step: u32,
    /// Cadence lower bound in raw-sample periods
    min_step_gap: usize,
    /// Consecutive candidates required before crediting
    regulation_threshold: u32,
    /// Consecutive in-cadence candidates
    regulation: u32,
    /// Position of the last candidate within its batch
    last_step_index: usize,
    /// Batches completed since the last candidate
    last_step_set: u32,
    /// Cumulative confirmed steps
    steps: u32,
}

impl CadenceRegulator {
    /// Create a regulator from the cadence fields of `settings`
    pub fn new(settings: &PedometerSettings) -> Self {
        Self {
            batch_stride: settings.batch_stride,
            max_batches_since_step: settings.max_batches_since_step,
            min_step_gap: settings.min_step_gap,
            regulation_threshold: settings.regulation_threshold,
            regulation: 0,
            last_step_index: 0,
            last_step_set: 0,
            steps: 0,
        }
    }

    /// Judge one candidate crossing at raw-sample `position` of the current batch
    ///
    /// Either way the candidate becomes the reference point for the next one.
    pub fn on_candidate(&mut self, position: usize) -> Verdict {
        let verdict = if self.in_cadence(position) {
            self.regulation = self.regulation.saturating_add(1);

            if self.regulation == self.regulation_threshold {
                self.credit(self.regulation_threshold)
            } else if self.regulation > self.regulation_threshold {
                self.credit(1)
            } else {
                Verdict::Accrued
            }
        } else {
            self.regulation = 0;
            Verdict::Rejected
        };

        trace!(
            "candidate at {} ({} batches since last): {:?}, regulation {}",
            position, self.last_step_set, verdict, self.regulation
        );

        self.last_step_set = 0;
        self.last_step_index = position;
        verdict
    }

    /// Advance the batch counter; call once at the end of every batch
    pub fn end_batch(&mut self) {
        self.last_step_set = self.last_step_set.saturating_add(1);
    }

    /// Whether a candidate at `position` satisfies both cadence bounds
    fn in_cadence(&self, position: usize) -> bool {
        if self.last_step_set > self.max_batches_since_step {
            return false;
        }

        let elapsed = self
            .batch_stride
            .saturating_mul(self.last_step_set as usize)
            .saturating_add(position);
        elapsed.saturating_sub(self.last_step_index) > self.min_step_gap
    }

    fn credit(&mut self, steps: u32) -> Verdict {
        self.steps = self.steps.saturating_add(steps);
        debug!("credited {} steps, total {}", steps, self.steps);
        Verdict::Credited(steps)
    }

    /// Cumulative confirmed steps
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Overwrite the cumulative step count
    pub fn set_steps(&mut self, steps: u32) {
        self.steps = steps;
    }

    /// Consecutive in-cadence candidates
    pub fn regulation(&self) -> u32 {
        self.regulation
    }

    /// Position of the last candidate within its batch
    pub fn last_step_index(&self) -> usize {
        self.last_step_index
    }

    /// Batches completed since the last candidate
    pub fn last_step_set(&self) -> u32 {
        self.last_step_set
    }

    /// Current regulation state
    pub fn state(&self) -> CadenceState {
        match self.regulation {
            0 => CadenceState::Idle,
            r if r < self.regulation_threshold => CadenceState::Accumulating,
            _ => CadenceState::Crediting,
        }
    }

    /// Clear regulation and position bookkeeping, keeping the step count
    pub fn reset(&mut self) {
        self.regulation = 0;
        self.last_step_index = 0;
        self.last_step_set = 0;
    }
}
