//! Deterministic synthetic point clouds.
//!
//! Two layouts bracket the engine's behaviour: a single chain where every
//! point joins one giant cluster, and many small blobs spread far apart.

use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};
use thiserror::Error;
use voxclust_core::Point;

/// Errors raised for invalid synthetic cloud parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntheticError {
    /// A cloud must contain at least one point.
    #[error("point count must be positive")]
    ZeroPoints,
    /// Blob layouts need at least one blob.
    #[error("blob count must be positive")]
    ZeroBlobs,
    /// More blobs than points were requested.
    #[error("blob count ({blob_count}) exceeds point count ({point_count})")]
    BlobCountExceedsPointCount {
        /// Requested blobs.
        blob_count: usize,
        /// Requested points.
        point_count: usize,
    },
    /// The cloud does not fit in `i32` coordinates.
    #[error("cloud of {point_count} points does not fit in i32 coordinates")]
    CoordinateOverflow {
        /// Requested points.
        point_count: usize,
    },
}

/// Configuration for [`blobs`].
#[derive(Clone, Debug)]
pub struct BlobConfig {
    /// Total number of points.
    pub point_count: usize,
    /// Number of blobs the points are spread over.
    pub blob_count: usize,
    /// Half-width of the cube each blob is sampled from.
    pub radius: i32,
    /// Distance between neighbouring blob centres along the x axis.
    pub spacing: i32,
    /// RNG seed.
    pub seed: u64,
}

/// A run of unit-spaced points along a shuffled staircase.
///
/// Consecutive steps alternate between the x and y axis, so a `√2`
/// threshold links the whole chain into one cluster. Input order is shuffled
/// with `seed` so the pool cannot rely on locality of the input.
///
/// # Errors
/// Returns [`SyntheticError`] when `point_count` is zero or too large.
///
/// # Examples
/// ```
/// use voxclust_benches::synthetic::chain;
///
/// let cloud = chain(10, 7)?;
/// assert_eq!(cloud.len(), 10);
/// # Ok::<(), voxclust_benches::synthetic::SyntheticError>(())
/// ```
pub fn chain(point_count: usize, seed: u64) -> Result<Vec<Point>, SyntheticError> {
    if point_count == 0 {
        return Err(SyntheticError::ZeroPoints);
    }
    let steps = i32::try_from(point_count).map_err(|_| SyntheticError::CoordinateOverflow {
        point_count,
    })?;
    let mut points: Vec<Point> = (0..steps)
        .map(|step| {
            let x = step.div_euclid(2) + step.rem_euclid(2);
            let y = step.div_euclid(2);
            Point::new(x, y, 0)
        })
        .collect();
    points.shuffle(&mut SmallRng::seed_from_u64(seed));
    Ok(points)
}

/// Points spread over `blob_count` well-separated cubes.
///
/// # Errors
/// Returns [`SyntheticError`] when the counts are zero, inconsistent or the
/// layout overflows `i32`.
///
/// # Examples
/// ```
/// use voxclust_benches::synthetic::{BlobConfig, blobs};
///
/// let cloud = blobs(&BlobConfig {
///     point_count: 100,
///     blob_count: 4,
///     radius: 2,
///     spacing: 100,
///     seed: 1,
/// })?;
/// assert_eq!(cloud.len(), 100);
/// # Ok::<(), voxclust_benches::synthetic::SyntheticError>(())
/// ```
pub fn blobs(config: &BlobConfig) -> Result<Vec<Point>, SyntheticError> {
    if config.point_count == 0 {
        return Err(SyntheticError::ZeroPoints);
    }
    if config.blob_count == 0 {
        return Err(SyntheticError::ZeroBlobs);
    }
    if config.blob_count > config.point_count {
        return Err(SyntheticError::BlobCountExceedsPointCount {
            blob_count: config.blob_count,
            point_count: config.point_count,
        });
    }
    let overflow = || SyntheticError::CoordinateOverflow {
        point_count: config.point_count,
    };
    let blob_count = i32::try_from(config.blob_count).map_err(|_| overflow())?;
    blob_count
        .checked_mul(config.spacing)
        .and_then(|extent| extent.checked_add(config.radius))
        .ok_or_else(overflow)?;

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let radius = config.radius.max(0);
    let points = (0..config.point_count)
        .map(|_| {
            let centre = rng.gen_range(0..blob_count) * config.spacing;
            Point::new(
                centre + rng.gen_range(-radius..=radius),
                rng.gen_range(-radius..=radius),
                rng.gen_range(-radius..=radius),
            )
        })
        .collect();
    Ok(points)
}
