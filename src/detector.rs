//! Step event detection for the pedometer

/// Step event detector
///
/// Filters the composite magnitude against a noise margin and flags falling
/// crossings of the dynamic threshold as candidate steps. Rising crossings
/// are ignored. The filtered signal only spans one batch; the caller clears
/// it with [`reset`](Self::reset) before each batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepEventDetector {
    /// Noise-rejection margin
    sensitivity: u32,
    /// Current filtered magnitude
    sample_new: i32,
    /// Previous filtered magnitude; zero until the filter has seen a sample this batch
    sample_old: i32,
}

impl StepEventDetector {
    /// Create a detector with the given noise-rejection margin
    pub fn new(sensitivity: u32) -> Self {
        Self {
            sensitivity,
            sample_new: 0,
            sample_old: 0,
        }
    }

    /// Feed one composite magnitude and report whether it completes a falling crossing
    ///
    /// The filtered signal only moves when the magnitude differs from it by
    /// more than the sensitivity. A crossing needs the previous filtered value
    /// strictly above `threshold`, the new one strictly below, and a previous
    /// value that is non-zero so the very first sample cannot fire.
    ///
    /// # Example
    /// ```
    /// use stride_pedometer::detector::StepEventDetector;
    ///
    /// let mut detector = StepEventDetector::new(60);
    /// assert!(!detector.update(1000, 600));
    /// assert!(detector.update(200, 600));
    /// assert!(!detector.update(1000, 600)); // rising edge
    /// ```
    pub fn update(&mut self, magnitude: i32, threshold: i32) -> bool {
        self.sample_old = self.sample_new;

        if magnitude.abs_diff(self.sample_new) > self.sensitivity {
            self.sample_new = magnitude;
        }

        self.sample_new < threshold && self.sample_old > threshold && self.sample_old != 0
    }

    /// Current noise-rejection margin
    pub fn sensitivity(&self) -> u32 {
        self.sensitivity
    }

    /// Replace the noise-rejection margin
    pub fn set_sensitivity(&mut self, sensitivity: u32) {
        self.sensitivity = sensitivity;
    }

    /// Raise the margin by `step`
    pub fn increase_sensitivity(&mut self, step: u32) {
        self.sensitivity = self.sensitivity.saturating_add(step);
    }

    /// Lower the margin by `step`, stopping at zero
    pub fn decrease_sensitivity(&mut self, step: u32) {
        self.sensitivity = self.sensitivity.saturating_sub(step);
    }

    /// Current filtered magnitude
    pub fn sample_new(&self) -> i32 {
        self.sample_new
    }

    /// Previous filtered magnitude
    pub fn sample_old(&self) -> i32 {
        self.sample_old
    }

    /// Clear the filtered signal at the start of a batch, keeping the sensitivity
    pub fn reset(&mut self) {
        self.sample_new = 0;
        self.sample_old = 0;
    }
}
