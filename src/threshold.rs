//! Dynamic threshold tracking for the pedometer

use log::debug;

/// Running minimum before any magnitude is observed
const MIN_SENTINEL: i32 = i32::MAX;
/// Running maximum before any magnitude is observed
const MAX_SENTINEL: i32 = i32::MIN;

/// Dynamic threshold tracker
///
/// Tracks the extremes of the composite magnitude across one batch and
/// publishes their midpoint as the crossing reference for the next batch.
/// A batch is always judged against the threshold of the batch before it,
/// since its own extremes are unknown until it has been scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdTracker {
    /// Crossing reference for the batch in progress
    threshold: i32,
    /// Smallest magnitude observed in the current batch
    running_min: i32,
    /// Largest magnitude observed in the current batch
    running_max: i32,
}

impl ThresholdTracker {
    /// Create a tracker with a zero threshold
    pub fn new() -> Self {
        Self {
            threshold: 0,
            running_min: MIN_SENTINEL,
            running_max: MAX_SENTINEL,
        }
    }

    /// Reset the running extremes at the start of a batch
    pub fn begin_batch(&mut self) {
        self.running_min = MIN_SENTINEL;
        self.running_max = MAX_SENTINEL;
    }

    /// Fold one composite magnitude into the running extremes
    pub fn observe(&mut self, magnitude: i32) {
        self.running_min = self.running_min.min(magnitude);
        self.running_max = self.running_max.max(magnitude);
    }

    /// Publish the midpoint of the running extremes as the next threshold
    ///
    /// Integer division truncates toward zero. A batch with no observations
    /// keeps the previous threshold.
    pub fn publish(&mut self) -> i32 {
        if self.running_min <= self.running_max {
            let midpoint = (i64::from(self.running_max) + i64::from(self.running_min)) / 2;
            self.threshold = midpoint as i32;
            debug!(
                "threshold {} (min {}, max {})",
                self.threshold, self.running_min, self.running_max
            );
        }
        self.threshold
    }

    /// Crossing reference for the batch in progress
    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    /// Smallest magnitude observed since the last batch began
    pub fn running_min(&self) -> i32 {
        self.running_min
    }

    /// Largest magnitude observed since the last batch began
    pub fn running_max(&self) -> i32 {
        self.running_max
    }

    /// Return to the initial state
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for ThresholdTracker {
    fn default() -> Self {
        Self::new()
    }
}
