//! Core types and settings for the pedometer

use nalgebra::Vector3;

use crate::error::PedometerError;

/// One accelerometer reading in milli-g, as delivered by the sensor
pub type RawSample = Vector3<i16>;

/// Componentwise mean of one smoothing group
pub type SmoothedVector = Vector3<i32>;

/// Pedometer settings
///
/// Every numeric constant of the detector lives here. The defaults describe
/// a wrist sensor delivering 25 samples every half second at 50 Hz; they set
/// the accepted cadence window to roughly 0.2 s to 2 s between steps.
///
/// # Example
/// ```
/// use stride_pedometer::{Pedometer, PedometerSettings};
///
/// let settings = PedometerSettings {
///     sensitivity: 80,      // noisier sensor
///     min_step_gap: 12,     // 240 ms at 50 Hz
///     ..Default::default()
/// };
/// let pedometer = Pedometer::with_settings(settings).unwrap();
/// assert_eq!(pedometer.sensitivity(), 80);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PedometerSettings {
    /// Nominal number of samples per sensor callback
    ///
    /// Must be a multiple of `group_size`.
    pub batch_size: usize,
    /// Positions one batch adds to the gap between candidates in different batches
    ///
    /// Positions within a batch run from 0 to `batch_size - 1`; a candidate
    /// `n` batches after the previous one is credited `n * batch_stride` on
    /// top of the positional difference.
    pub batch_stride: usize,
    /// Sensor sampling rate in Hz
    pub sample_rate: f32,
    /// Number of consecutive raw samples averaged into one smoothed vector
    pub group_size: usize,
    /// Initial noise-rejection margin
    ///
    /// A new composite magnitude replaces the filtered signal only when it
    /// differs from it by more than this amount.
    pub sensitivity: u32,
    /// Amount added or removed by one sensitivity adjustment
    pub sensitivity_step: u32,
    /// Most batches that may elapse between consecutive candidate steps
    pub max_batches_since_step: u32,
    /// Raw-sample periods that must separate consecutive candidate steps
    ///
    /// The gap must strictly exceed this value.
    pub min_step_gap: usize,
    /// Consecutive in-cadence candidates required before steps are credited
    ///
    /// When the count is reached, all of them are credited at once.
    pub regulation_threshold: u32,
}

impl Default for PedometerSettings {
    fn default() -> Self {
        Self {
            batch_size: 25,
            batch_stride: 50,
            sample_rate: 50.0,
            group_size: 5,
            sensitivity: 60,
            sensitivity_step: 10,
            max_batches_since_step: 3,
            min_step_gap: 10,
            regulation_threshold: 5,
        }
    }
}

impl PedometerSettings {
    /// Check the settings for internal consistency
    ///
    /// # Errors
    /// Returns [`PedometerError::InvalidSettings`] naming the first violated rule.
    pub fn validate(&self) -> Result<(), PedometerError> {
        if self.group_size == 0 {
            return Err(PedometerError::InvalidSettings("group_size must be non-zero"));
        }
        if self.batch_size == 0 {
            return Err(PedometerError::InvalidSettings("batch_size must be non-zero"));
        }
        if self.batch_size % self.group_size != 0 {
            return Err(PedometerError::InvalidSettings(
                "batch_size must be a multiple of group_size",
            ));
        }
        if self.batch_stride == 0 {
            return Err(PedometerError::InvalidSettings("batch_stride must be non-zero"));
        }
        if self.regulation_threshold == 0 {
            return Err(PedometerError::InvalidSettings(
                "regulation_threshold must be non-zero",
            ));
        }
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(PedometerError::InvalidSettings(
                "sample_rate must be finite and positive",
            ));
        }
        Ok(())
    }

    /// Accepted time between steps in seconds, as `(shortest, longest)`
    ///
    /// # Example
    /// ```
    /// use stride_pedometer::PedometerSettings;
    ///
    /// let (shortest, longest) = PedometerSettings::default().cadence_window();
    /// assert!((shortest - 0.2).abs() < 1e-6);
    /// assert!((longest - 2.0).abs() < 1e-6);
    /// ```
    pub fn cadence_window(&self) -> (f32, f32) {
        let shortest = self.min_step_gap as f32 / self.sample_rate;
        let longest =
            (self.max_batches_since_step + 1) as f32 * self.batch_size as f32 / self.sample_rate;
        (shortest, longest)
    }
}

/// Result of processing one sample batch
///
/// # Example
/// ```
/// use stride_pedometer::{Pedometer, RawSample};
///
/// let mut pedometer = Pedometer::new();
/// let batch = [RawSample::new(0, 0, -1000); 25];
/// let report = pedometer.process_batch(&batch).unwrap();
///
/// assert_eq!(report.steps_total, 0);
/// assert!(!report.changed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    /// Cumulative confirmed step count after the batch
    pub steps_total: u32,
    /// Steps credited by this batch
    pub steps_added: u32,
    /// Whether this batch credited any steps
    pub changed: bool,
}

/// Cadence regulator state
///
/// Derived from the consecutive-candidate counter. There is no terminal
/// state; the regulator cycles for the lifetime of the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CadenceState {
    /// No in-cadence candidates pending
    #[default]
    Idle,
    /// Candidates are accruing silently below the regulation threshold
    Accumulating,
    /// Threshold reached; each further candidate is credited as one step
    Crediting,
}

/// Detector internal states
///
/// Snapshot of the working variables as left by the last batch. Useful for
/// tuning against recorded traces.
///
/// # Example
/// ```
/// use stride_pedometer::Pedometer;
///
/// let pedometer = Pedometer::new();
/// let states = pedometer.internal_states();
///
/// assert_eq!(states.threshold, 0);
/// assert_eq!(states.regulation, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DetectorInternalStates {
    /// Crossing reference published by the previous batch
    pub threshold: i32,
    /// Smallest composite magnitude seen in the last batch
    pub running_min: i32,
    /// Largest composite magnitude seen in the last batch
    pub running_max: i32,
    /// Filtered magnitude at the end of the last batch
    pub sample_new: i32,
    /// Previous filtered magnitude
    pub sample_old: i32,
    /// Current noise-rejection margin
    pub sensitivity: u32,
    /// Consecutive in-cadence candidates
    pub regulation: u32,
    /// Raw-sample position of the last candidate within its batch
    pub last_step_index: usize,
    /// Batches completed since the last candidate
    pub last_step_set: u32,
}
