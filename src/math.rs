//! Integer vector math for the pedometer
//!
//! The composite magnitude is computed with an iterative square root rather
//! than `f64::sqrt`, which is unavailable in `core`.

use nalgebra::Vector3;

/// Square root iteration stops once `a² - n` falls below this residual
pub const SQRT_EPSILON: f64 = 0.001;
/// Hard cap on square root iterations
pub const SQRT_MAX_ITERATIONS: u32 = 40;

/// Approximate square root by Newton-Raphson iteration
///
/// Seeds with `a = n` and iterates `a ← (a + n / a) / 2` until the residual
/// `a² - n` drops below [`SQRT_EPSILON`] or [`SQRT_MAX_ITERATIONS`] elapse.
/// Iterates approach the root from above, so truncating the result to an
/// integer never rounds a perfect square down.
///
/// `n = 0` returns exactly `0.0`; the iteration would otherwise divide by zero.
///
/// # Example
/// ```
/// use stride_pedometer::approx_sqrt;
///
/// assert_eq!(approx_sqrt(0), 0.0);
/// assert!((approx_sqrt(10_000) - 100.0).abs() < 0.01);
/// ```
pub fn approx_sqrt(n: u64) -> f64 {
    if n == 0 {
        return 0.0;
    }

    let n = n as f64;
    let mut a = n;
    let mut residual = a * a - n;
    let mut iterations = 0;

    while residual >= SQRT_EPSILON && iterations < SQRT_MAX_ITERATIONS {
        a = (a + n / a) / 2.0;
        residual = a * a - n;
        iterations += 1;
    }

    a
}

/// Extension trait for integer accelerometer vectors
pub trait Vector3Ext {
    /// Sum of squared components, widened so full-scale readings cannot overflow
    fn sum_of_squares(&self) -> u64;

    /// Composite magnitude: the approximate Euclidean norm truncated to an integer
    fn composite_magnitude(&self) -> i32;
}

impl Vector3Ext for Vector3<i32> {
    fn sum_of_squares(&self) -> u64 {
        // |i32::MIN|^2 * 3 = 3 * 2^62 still fits in u64
        let [x, y, z] = [self.x, self.y, self.z].map(|c| u64::from(c.unsigned_abs()));
        x * x + y * y + z * z
    }

    fn composite_magnitude(&self) -> i32 {
        // Saturating float-to-int cast; smoothed i16 readings stay far below i32::MAX
        approx_sqrt(self.sum_of_squares()) as i32
    }
}
