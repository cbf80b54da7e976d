//! Error types for the pedometer

use thiserror::Error;

/// Errors surfaced by the pedometer
///
/// Every variant is a local rejection of malformed input. A rejected call
/// leaves the detector state exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PedometerError {
    /// The batch is empty or its length is not a multiple of the smoothing group
    #[error("batch of {len} samples is not a non-empty multiple of the {group_size}-sample smoothing group")]
    InvalidBatch {
        /// Length of the rejected batch
        len: usize,
        /// Smoothing group size the batch was checked against
        group_size: usize,
    },
    /// The settings failed validation
    #[error("invalid pedometer settings: {0}")]
    InvalidSettings(&'static str),
}
