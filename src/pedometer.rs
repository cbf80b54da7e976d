//! Batch-level pedometer for the stride-pedometer library

use log::warn;

use crate::cadence::{CadenceRegulator, Verdict};
use crate::detector::StepEventDetector;
use crate::error::PedometerError;
use crate::math::Vector3Ext;
use crate::smoothing::SampleSmoother;
use crate::threshold::ThresholdTracker;
use crate::types::{CadenceState, DetectorInternalStates, PedometerSettings, RawSample, StepReport};

/// Pedometer
///
/// Consumes accelerometer batches and maintains a monotonically increasing
/// step count. Each batch is smoothed in groups, reduced to composite
/// magnitudes, checked for falling crossings of the dynamic threshold, and
/// the crossings are regulated against the walking cadence.
///
/// All detector state is owned here. The struct is not internally
/// synchronised; share it behind a lock if batches and adjustments arrive
/// on different threads.
#[derive(Debug, Clone)]
pub struct Pedometer {
    /// Validated settings
    settings: PedometerSettings,
    /// Batch grouping
    smoother: SampleSmoother,
    /// Crossing reference and per-batch extremes
    tracker: ThresholdTracker,
    /// Filtered signal and crossing test
    detector: StepEventDetector,
    /// Cadence bookkeeping and the step count
    regulator: CadenceRegulator,
    /// Raised by any change of the step count until taken
    counter_changed: bool,
}

impl Pedometer {
    /// Create a pedometer with default settings
    pub fn new() -> Self {
        Self::from_validated(PedometerSettings::default())
    }

    /// Create a pedometer with the given settings
    ///
    /// # Errors
    /// [`PedometerError::InvalidSettings`] if the settings are inconsistent.
    pub fn with_settings(settings: PedometerSettings) -> Result<Self, PedometerError> {
        settings.validate()?;
        Ok(Self::from_validated(settings))
    }

    fn from_validated(settings: PedometerSettings) -> Self {
        Self {
            settings,
            smoother: SampleSmoother::new(settings.group_size),
            tracker: ThresholdTracker::new(),
            detector: StepEventDetector::new(settings.sensitivity),
            regulator: CadenceRegulator::new(&settings),
            counter_changed: false,
        }
    }

    /// Replace the settings
    ///
    /// The step count survives; the rest of the detector restarts, and the
    /// sensitivity is taken from the new settings.
    ///
    /// # Errors
    /// [`PedometerError::InvalidSettings`] if the settings are inconsistent,
    /// in which case nothing changes.
    pub fn set_settings(&mut self, settings: PedometerSettings) -> Result<(), PedometerError> {
        settings.validate()?;
        let steps = self.regulator.steps();
        let counter_changed = self.counter_changed;

        *self = Self::from_validated(settings);
        self.regulator.set_steps(steps);
        self.counter_changed = counter_changed;
        Ok(())
    }

    /// Current settings
    pub fn settings(&self) -> PedometerSettings {
        self.settings
    }

    /// Process one batch of raw samples
    ///
    /// The batch is judged against the threshold published by the previous
    /// batch and then publishes its own.
    ///
    /// # Errors
    /// [`PedometerError::InvalidBatch`] if the batch is empty or does not
    /// split into whole smoothing groups. The detector is left untouched.
    ///
    /// # Example
    /// ```
    /// use stride_pedometer::{Pedometer, RawSample};
    ///
    /// let mut pedometer = Pedometer::new();
    ///
    /// let report = pedometer.process_batch(&[RawSample::new(0, 0, 1000); 25]).unwrap();
    /// assert_eq!(report.steps_added, 0);
    ///
    /// assert!(pedometer.process_batch(&[RawSample::new(0, 0, 1000); 24]).is_err());
    /// ```
    pub fn process_batch(&mut self, batch: &[RawSample]) -> Result<StepReport, PedometerError> {
        let groups = self
            .smoother
            .groups(batch)
            .inspect_err(|err| warn!("rejected batch: {}", err))?;

        if batch.len() != self.settings.batch_size {
            warn!(
                "batch of {} samples, expected {}; cadence spacing assumes a stride of {}",
                batch.len(),
                self.settings.batch_size,
                self.settings.batch_stride
            );
        }

        self.tracker.begin_batch();
        self.detector.reset();
        let threshold = self.tracker.threshold();
        let mut steps_added = 0u32;

        for group in groups {
            let magnitude = group.vector.composite_magnitude();

            if self.detector.update(magnitude, threshold) {
                if let Verdict::Credited(steps) = self.regulator.on_candidate(group.position) {
                    steps_added = steps_added.saturating_add(steps);
                }
            }

            self.tracker.observe(magnitude);
        }

        self.tracker.publish();
        self.regulator.end_batch();

        let changed = steps_added > 0;
        if changed {
            self.counter_changed = true;
        }

        Ok(StepReport {
            steps_total: self.regulator.steps(),
            steps_added,
            changed,
        })
    }

    /// Cumulative confirmed step count
    pub fn steps(&self) -> u32 {
        self.regulator.steps()
    }

    /// Zero the step count
    pub fn reset_steps(&mut self) {
        self.regulator.set_steps(0);
        self.counter_changed = true;
    }

    /// Restore a step count saved by an earlier run
    pub fn load_steps(&mut self, steps: u32) {
        self.regulator.set_steps(steps);
        self.counter_changed = true;
    }

    /// Step count to hand to persistent storage at shutdown
    pub fn steps_on_shutdown(&self) -> u32 {
        self.regulator.steps()
    }

    /// Take the "counter changed" signal, clearing it
    ///
    /// Raised whenever the step count changes: by crediting, reset, or load.
    pub fn take_counter_changed(&mut self) -> bool {
        core::mem::take(&mut self.counter_changed)
    }

    /// Whether the "counter changed" signal is pending
    pub fn counter_changed(&self) -> bool {
        self.counter_changed
    }

    /// Current noise-rejection margin
    pub fn sensitivity(&self) -> u32 {
        self.detector.sensitivity()
    }

    /// Replace the noise-rejection margin
    pub fn set_sensitivity(&mut self, sensitivity: u32) {
        self.detector.set_sensitivity(sensitivity);
    }

    /// Raise the noise-rejection margin by one step
    pub fn increase_sensitivity(&mut self) {
        self.detector.increase_sensitivity(self.settings.sensitivity_step);
    }

    /// Lower the noise-rejection margin by one step, stopping at zero
    pub fn decrease_sensitivity(&mut self) {
        self.detector.decrease_sensitivity(self.settings.sensitivity_step);
    }

    /// Current cadence regulation state
    pub fn cadence_state(&self) -> CadenceState {
        self.regulator.state()
    }

    /// Get detector internal states
    pub fn internal_states(&self) -> DetectorInternalStates {
        DetectorInternalStates {
            threshold: self.tracker.threshold(),
            running_min: self.tracker.running_min(),
            running_max: self.tracker.running_max(),
            sample_new: self.detector.sample_new(),
            sample_old: self.detector.sample_old(),
            sensitivity: self.detector.sensitivity(),
            regulation: self.regulator.regulation(),
            last_step_index: self.regulator.last_step_index(),
            last_step_set: self.regulator.last_step_set(),
        }
    }

    /// Clear the detector state, keeping the step count and sensitivity
    pub fn restart(&mut self) {
        self.tracker.reset();
        self.detector.reset();
        self.regulator.reset();
    }
}

impl Default for Pedometer {
    fn default() -> Self {
        Self::new()
    }
}
