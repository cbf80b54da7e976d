#![cfg_attr(not(test), no_std)]

//! [![github]](https://github.com/wboayue/stride-pedometer)&ensp;[![crates-io]](https://crates.io/crates/stride-pedometer)&ensp;[![license]](https://opensource.org/licenses/MIT)
//!
//! [github]: https://img.shields.io/badge/github-8da0cb?style=for-the-badge&labelColor=555555&logo=github
//! [crates-io]: https://img.shields.io/badge/crates.io-fc8d62?style=for-the-badge&labelColor=555555&logo=rust
//! [license]: https://img.shields.io/badge/License-MIT-blue.svg?style=for-the-badge&labelColor=555555
//!
//! Stride Pedometer - A step counter for wrist-worn 3-axis accelerometers
//!
//! The library turns batches of raw accelerometer samples into a confirmed,
//! monotonically increasing step count. It is meant to run inside the sensor
//! callback of a watch or band and keeps no state outside the [`Pedometer`]
//! value.
//!
//! # Features
//!
//! - Averaging of raw samples in fixed groups to suppress sensor noise
//! - Composite magnitude via an integer-friendly Newton-Raphson square root
//! - Dynamic threshold from the previous batch's magnitude extremes
//! - Falling-edge crossing detection with an adjustable noise margin
//! - Cadence regulation that holds back isolated crossings and backfills
//!   confirmed walks
//! - `#![no_std]` compatible for embedded systems
//!
//! # Quick Start
//!
//! ```rust
//! use stride_pedometer::{Pedometer, RawSample};
//!
//! let mut pedometer = Pedometer::new();
//!
//! // One sensor callback: 25 samples in milli-g at 50 Hz
//! let batch = [RawSample::new(12, -40, -985); 25];
//!
//! let report = pedometer.process_batch(&batch).unwrap();
//! if report.changed {
//!     println!("steps: {}", report.steps_total);
//! }
//!
//! // Button handlers
//! pedometer.increase_sensitivity();
//! pedometer.reset_steps();
//! ```
//!
//! For more documentation and examples, see: <https://github.com/wboayue/stride-pedometer>

pub mod cadence;
pub mod detector;
mod error;
mod math;
mod pedometer;
pub mod smoothing;
pub mod threshold;
mod types;

// Re-export all public types and functions
pub use cadence::{CadenceRegulator, Verdict};
pub use detector::StepEventDetector;
pub use error::PedometerError;
pub use math::{SQRT_EPSILON, SQRT_MAX_ITERATIONS, Vector3Ext, approx_sqrt};
pub use pedometer::Pedometer;
pub use smoothing::{SampleSmoother, SmoothedGroup};
pub use threshold::ThresholdTracker;
pub use types::*;
