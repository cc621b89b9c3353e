//! Candidate pools: the shrinking set of points not yet assigned to a
//! cluster.
//!
//! A pool is loaded once with every input point and only ever shrinks.
//! [`CandidatePool::extract_any`] hands out cluster seeds and
//! [`CandidatePool::extract_within`] removes every remaining point inside a
//! radius. Removal happens at discovery, which is what stops a point from
//! being claimed by two clusters.
//!
//! Two index-based implementations are provided:
//!
//! - [`LinearPool`]: a contiguous vector compacted in place. Every radius
//!   query scans the whole remaining pool.
//! - [`GridPool`]: a hash grid keyed by `floor(coordinate / cell)`, with a
//!   cell edge of at least the radius, so a query only visits the 27 cells
//!   around its centre.

mod grid;
mod linear;

pub use grid::GridPool;
pub use linear::LinearPool;

use crate::{
    distance::Threshold,
    point::{Coordinate, Point, PointId},
};

/// A point waiting in a pool: its input position and coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// Input position.
    pub id: PointId,
    /// Coordinate used for radius queries.
    pub coordinate: Coordinate,
}

impl Candidate {
    /// Builds candidates for every point, in input order.
    ///
    /// # Examples
    /// ```
    /// use voxclust_core::{Candidate, Point, PointId};
    ///
    /// let candidates = Candidate::from_points(&[Point::new(0, 0, 0), Point::new(4, 0, 0)]);
    /// assert_eq!(candidates[1].id, PointId::new(1));
    /// assert_eq!(candidates[1].coordinate, [4, 0, 0]);
    /// ```
    #[must_use]
    pub fn from_points(points: &[Point]) -> Vec<Self> {
        points
            .iter()
            .enumerate()
            .map(|(index, point)| Self {
                id: PointId::new(index),
                coordinate: point.coordinate(),
            })
            .collect()
    }
}

/// Mutable collection of unassigned points.
///
/// Both extraction methods take `&mut self`; the borrow checker rules out
/// two queries racing over the same pool state.
pub trait CandidatePool {
    /// Builds a pool holding `candidates`, tuned for queries of `radius`.
    /// The first candidate is the first seed [`Self::extract_any`] returns.
    fn load(candidates: Vec<Candidate>, radius: Threshold) -> Self
    where
        Self: Sized;

    /// Number of points still in the pool.
    fn len(&self) -> usize;

    /// Returns whether the pool has been drained.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes and returns one remaining point, or `None` once the pool is
    /// empty.
    ///
    /// Candidates are handed out in the order the pool was loaded with,
    /// skipping any that radius queries already removed.
    fn extract_any(&mut self) -> Option<Candidate>;

    /// Removes and returns every remaining point within `radius` of
    /// `center` (inclusive).
    ///
    /// The order of the returned candidates depends only on the pool state,
    /// so identical inputs give identical results.
    fn extract_within(&mut self, center: &Coordinate, radius: Threshold) -> Vec<Candidate>;
}
