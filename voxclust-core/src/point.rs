//! Points in the input cloud.

use std::fmt;

use crate::partition::ClusterId;

/// Integer coordinate triple. Axis order is whatever the caller supplied.
pub type Coordinate = [i32; 3];

/// Label written for points that carry no cluster assignment.
pub const UNASSIGNED_LABEL: i64 = -1;

/// Position of a point in the original input sequence.
///
/// Points are identified by position rather than by value, so two points
/// with identical coordinates remain distinct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(usize);

impl PointId {
    /// Wraps an input index.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(index: usize) -> Self { Self(index) }

    /// Returns the input index.
    #[rustfmt::skip]
    #[must_use]
    pub const fn index(self) -> usize { self.0 }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A coordinate plus its cluster assignment.
///
/// # Examples
/// ```
/// use voxclust_core::{ClusterId, Point};
///
/// let mut point = Point::new(1, -2, 3);
/// assert_eq!(point.coordinate(), [1, -2, 3]);
/// assert_eq!(point.cluster_label(), -1);
///
/// point.assign(ClusterId::new(4));
/// assert_eq!(point.cluster(), Some(ClusterId::new(4)));
/// assert_eq!(point.cluster_label(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    coordinate: Coordinate,
    cluster: Option<ClusterId>,
}

impl Point {
    /// Creates an unassigned point.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self::from_coordinate([x, y, z])
    }

    /// Creates an unassigned point from a coordinate triple.
    #[must_use]
    pub const fn from_coordinate(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            cluster: None,
        }
    }

    /// Returns the coordinate triple.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Returns the assigned cluster, if any.
    #[must_use]
    pub const fn cluster(&self) -> Option<ClusterId> {
        self.cluster
    }

    /// Returns the cluster id as a signed label, [`UNASSIGNED_LABEL`] when
    /// the point has not been assigned.
    #[must_use]
    pub fn cluster_label(&self) -> i64 {
        self.cluster
            .and_then(|id| i64::try_from(id.get()).ok())
            .unwrap_or(UNASSIGNED_LABEL)
    }

    /// Returns `true` once the point carries a cluster id.
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.cluster.is_some()
    }

    /// Records the point's cluster.
    pub const fn assign(&mut self, cluster: ClusterId) {
        self.cluster = Some(cluster);
    }

    /// Returns a copy of this point with the assignment cleared.
    #[must_use]
    pub const fn unassigned(self) -> Self {
        Self::from_coordinate(self.coordinate)
    }
}

impl From<Coordinate> for Point {
    fn from(coordinate: Coordinate) -> Self {
        Self::from_coordinate(coordinate)
    }
}
