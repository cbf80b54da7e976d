//! Sample smoothing for the pedometer
//!
//! Raw readings are averaged in fixed-size groups before magnitude estimation.
//! Groups are bounds-checked views over the batch; a batch that does not split
//! evenly is rejected up front instead of being read past its end.

use core::iter::Enumerate;
use core::slice::ChunksExact;

use nalgebra::Vector3;

use crate::error::PedometerError;
use crate::types::{RawSample, SmoothedVector};

/// Componentwise integer mean of one group of raw samples
///
/// Division truncates toward zero. An empty group yields the zero vector.
///
/// # Example
/// ```
/// use stride_pedometer::{RawSample, smoothing::average};
///
/// let group = [
///     RawSample::new(1, -1, 1000),
///     RawSample::new(2, -2, 1001),
///     RawSample::new(3, -3, 1002),
///     RawSample::new(4, -4, 1003),
///     RawSample::new(5, -6, 1004),
/// ];
/// let mean = average(&group);
/// assert_eq!((mean.x, mean.y, mean.z), (3, -3, 1002));
/// ```
pub fn average(group: &[RawSample]) -> SmoothedVector {
    if group.is_empty() {
        return Vector3::zeros();
    }

    let sum = group
        .iter()
        .fold(Vector3::<i64>::zeros(), |acc, sample| acc + sample.map(i64::from));
    let mean = sum / group.len() as i64;

    mean.map(|component| component as i32)
}

/// Splits batches into smoothing groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSmoother {
    group_size: usize,
}

impl SampleSmoother {
    /// Create a smoother averaging `group_size` samples per group
    pub fn new(group_size: usize) -> Self {
        Self { group_size }
    }

    /// Samples averaged per group
    pub fn group_size(&self) -> usize {
        self.group_size
    }

    /// Check that a batch splits into whole groups
    ///
    /// # Errors
    /// [`PedometerError::InvalidBatch`] when the batch is empty or its length
    /// is not a multiple of the group size.
    pub fn validate(&self, batch: &[RawSample]) -> Result<(), PedometerError> {
        if self.group_size == 0 || batch.is_empty() || batch.len() % self.group_size != 0 {
            return Err(PedometerError::InvalidBatch {
                len: batch.len(),
                group_size: self.group_size,
            });
        }
        Ok(())
    }

    /// Iterate over the smoothed groups of a validated batch
    ///
    /// # Errors
    /// Same as [`SampleSmoother::validate`].
    ///
    /// # Example
    /// ```
    /// use stride_pedometer::{RawSample, smoothing::SampleSmoother};
    ///
    /// let smoother = SampleSmoother::new(5);
    /// let batch = [RawSample::new(0, 0, 1000); 25];
    ///
    /// let groups: Vec<_> = smoother.groups(&batch).unwrap().collect();
    /// assert_eq!(groups.len(), 5);
    /// assert_eq!(groups[4].index, 4);
    /// assert_eq!(groups[4].position, 24);
    ///
    /// assert!(smoother.groups(&batch[..24]).is_err());
    /// ```
    pub fn groups<'a>(&self, batch: &'a [RawSample]) -> Result<SmoothedGroups<'a>, PedometerError> {
        self.validate(batch)?;
        Ok(SmoothedGroups {
            chunks: batch.chunks_exact(self.group_size).enumerate(),
            group_size: self.group_size,
        })
    }
}

/// One smoothed group and where it sits in its batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmoothedGroup {
    /// Group index within the batch
    pub index: usize,
    /// Raw-sample index of the group's last sample, used for cadence spacing
    pub position: usize,
    /// Componentwise mean of the group
    pub vector: SmoothedVector,
}

/// Iterator over the smoothed groups of one batch
#[derive(Debug, Clone)]
pub struct SmoothedGroups<'a> {
    chunks: Enumerate<ChunksExact<'a, RawSample>>,
    group_size: usize,
}

impl Iterator for SmoothedGroups<'_> {
    type Item = SmoothedGroup;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, chunk) = self.chunks.next()?;
        Some(SmoothedGroup {
            index,
            position: index * self.group_size + self.group_size - 1,
            vector: average(chunk),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for SmoothedGroups<'_> {}
