//! Fixture types for the region-growth property suites.

use crate::point::Point;

/// Layout of a generated cloud.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum CloudShape {
    /// Points drawn uniformly from a small cube; many chance links.
    Scattered,
    /// Axis-aligned runs of unit-spaced points separated by wide gaps.
    Chains,
    /// Dense blobs around far-apart centres.
    Blobs,
    /// Lattice points with duplicates, probed at the `√2` and `√3` diagonals.
    Lattice,
}

/// A generated cloud and the threshold to cluster it with.
#[derive(Clone, Debug)]
pub(super) struct CloudFixture {
    /// Input points, unassigned.
    pub points: Vec<Point>,
    /// Connection threshold.
    pub threshold: f64,
    /// Shape used during generation.
    pub shape: CloudShape,
}
