//! Euclidean distance over integer coordinates and the validated
//! connection threshold.
//!
//! Per-axis differences are taken in 64-bit integers and squared into a
//! 128-bit accumulator, so any pair of `i32` coordinates yields an exact
//! squared distance. Threshold comparisons take the square root of that
//! exact value, which keeps boundary cases such as `√2` inclusive.

use std::f64::consts::SQRT_2;

use crate::{
    error::{ClusterError, Result},
    point::Coordinate,
};

/// Default connection threshold: face and edge neighbours on a unit lattice.
pub const DEFAULT_THRESHOLD: f64 = SQRT_2;

/// Returns the exact squared Euclidean distance between two coordinates.
///
/// # Examples
/// ```
/// use voxclust_core::squared_distance;
///
/// assert_eq!(squared_distance(&[0, 0, 0], &[1, 2, 2]), 9);
/// assert_eq!(squared_distance(&[i32::MIN, 0, 0], &[i32::MAX, 0, 0]), 18_446_744_065_119_617_025);
/// ```
#[must_use]
pub fn squared_distance(left: &Coordinate, right: &Coordinate) -> u128 {
    left.iter()
        .zip(right)
        .map(|(&l, &r)| {
            let diff = i64::from(l).abs_diff(i64::from(r));
            u128::from(diff) * u128::from(diff)
        })
        .sum()
}

/// Returns the Euclidean distance between two coordinates.
///
/// # Examples
/// ```
/// use voxclust_core::euclidean_distance;
///
/// assert_eq!(euclidean_distance(&[0, 0, 0], &[3, 4, 0]), 5.0);
/// assert_eq!(euclidean_distance(&[1, 1, 0], &[0, 0, 0]), std::f64::consts::SQRT_2);
/// ```
#[must_use]
pub fn euclidean_distance(left: &Coordinate, right: &Coordinate) -> f64 {
    root(squared_distance(left, right))
}

#[expect(
    clippy::cast_precision_loss,
    reason = "squared distances above 2^53 only occur for points far outside any useful threshold"
)]
fn root(squared: u128) -> f64 {
    (squared as f64).sqrt()
}

/// Maximum distance at which two points are directly connected.
///
/// The bound is inclusive: points exactly `threshold` apart are neighbours.
///
/// # Examples
/// ```
/// use voxclust_core::Threshold;
///
/// let threshold = Threshold::new(1.5)?;
/// assert!(threshold.admits(&[0, 0, 0], &[1, 1, 0]));
/// assert!(!threshold.admits(&[0, 0, 0], &[2, 0, 0]));
/// # Ok::<(), voxclust_core::ClusterError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    /// Validates a threshold.
    ///
    /// # Errors
    /// Returns [`ClusterError::InvalidThreshold`] when `value` is negative,
    /// NaN or infinite.
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(ClusterError::InvalidThreshold { got: value })
        }
    }

    /// Returns the raw distance.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Returns whether `left` and `right` are within the threshold.
    #[must_use]
    pub fn admits(self, left: &Coordinate, right: &Coordinate) -> bool {
        euclidean_distance(left, right) <= self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(DEFAULT_THRESHOLD)
    }
}
