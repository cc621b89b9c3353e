//! Cluster identifiers and the partition produced by a run.
//!
//! A [`ClusterPartition`] owns the input points with their assignments and
//! guarantees that every point carries an id from the contiguous range
//! `0..cluster_count`.

use std::{collections::HashMap, fmt};

use crate::{
    error::PartitionError,
    point::{Point, PointId, UNASSIGNED_LABEL},
};

/// Identifier assigned to a cluster, in discovery order starting at `0`.
///
/// # Examples
/// ```
/// use voxclust_core::ClusterId;
///
/// let id = ClusterId::new(4);
/// assert_eq!(id.get(), 4);
/// assert_eq!(id.to_string(), "4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(u64);

impl ClusterId {
    /// Creates a new cluster identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: u64) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> u64 { self.0 }

    /// Returns the identifier that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Members of one cluster, in ascending input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterMembers {
    /// Cluster identifier.
    pub id: ClusterId,
    /// Input positions of the member points.
    pub members: Vec<PointId>,
}

/// Every input point together with its final cluster.
///
/// # Examples
/// ```
/// use voxclust_core::{ClusterId, ClusterPartition, Point};
///
/// let mut a = Point::new(0, 0, 0);
/// let mut b = Point::new(9, 9, 9);
/// a.assign(ClusterId::new(0));
/// b.assign(ClusterId::new(1));
///
/// let partition = ClusterPartition::try_from_points(vec![a, b])?;
/// assert_eq!(partition.cluster_count(), 2);
/// assert_eq!(partition.max_cluster_label(), 1);
/// assert_eq!(partition.cluster_sizes(), [1, 1]);
/// # Ok::<(), voxclust_core::PartitionError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterPartition {
    points: Vec<Point>,
    cluster_count: usize,
}

impl ClusterPartition {
    /// Wraps points whose assignments the engine already guarantees.
    pub(crate) fn from_engine(points: Vec<Point>, cluster_count: usize) -> Self {
        debug_assert!(points.iter().all(Point::is_assigned));
        Self {
            points,
            cluster_count,
        }
    }

    /// Validates externally assigned points.
    ///
    /// An empty vector is accepted and yields `cluster_count == 0`.
    ///
    /// # Errors
    /// Returns [`PartitionError::Unassigned`] for the first point without a
    /// cluster, [`PartitionError::MissingZero`] when no point is in cluster
    /// `0`, [`PartitionError::Gap`] when an id below the maximum is unused
    /// and [`PartitionError::Overflow`] when the maximum id cannot be
    /// counted on this host.
    pub fn try_from_points(points: Vec<Point>) -> Result<Self, PartitionError> {
        let mut max_id = None::<u64>;
        for (index, point) in points.iter().enumerate() {
            let id = point
                .cluster()
                .ok_or(PartitionError::Unassigned { index })?
                .get();
            max_id = Some(max_id.map_or(id, |max| max.max(id)));
        }
        let Some(max_id) = max_id else {
            return Ok(Self {
                points,
                cluster_count: 0,
            });
        };

        let cluster_count = usize::try_from(max_id)
            .ok()
            .and_then(|max| max.checked_add(1))
            .ok_or(PartitionError::Overflow { id: max_id })?;
        if cluster_count > points.len() {
            // More ids than points: some id below the maximum is unused.
            let used = used_ids(&points, points.len());
            return Err(first_unused(&used));
        }
        let used = used_ids(&points, cluster_count);
        if used.iter().all(|&seen| seen) {
            Ok(Self {
                points,
                cluster_count,
            })
        } else {
            Err(first_unused(&used))
        }
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns whether the partition holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in input order, each carrying its cluster.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Consumes the partition, returning its points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Number of clusters.
    #[must_use]
    pub const fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Identifier of the last cluster discovered, `None` for empty input.
    #[must_use]
    pub fn max_cluster(&self) -> Option<ClusterId> {
        self.cluster_count
            .checked_sub(1)
            .map(|max| ClusterId::new(max as u64))
    }

    /// Signed form of [`Self::max_cluster`]: `-1` for empty input.
    #[must_use]
    pub fn max_cluster_label(&self) -> i64 {
        self.max_cluster()
            .and_then(|id| i64::try_from(id.get()).ok())
            .unwrap_or(UNASSIGNED_LABEL)
    }

    /// Cluster of the point at `id`.
    #[must_use]
    pub fn cluster_of(&self, id: PointId) -> Option<ClusterId> {
        self.points.get(id.index()).and_then(Point::cluster)
    }

    /// Number of members per cluster, indexed by cluster id.
    #[must_use]
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0_usize; self.cluster_count];
        for id in self.points.iter().filter_map(Point::cluster) {
            if let Some(size) = slot(&mut sizes, id) {
                *size += 1;
            }
        }
        sizes
    }

    /// Groups points by cluster in ascending id order.
    #[must_use]
    pub fn clusters(&self) -> Vec<ClusterMembers> {
        let mut groups: Vec<ClusterMembers> = (0..self.cluster_count)
            .map(|id| ClusterMembers {
                id: ClusterId::new(id as u64),
                members: Vec::new(),
            })
            .collect();
        for (index, point) in self.points.iter().enumerate() {
            let Some(id) = point.cluster() else {
                continue;
            };
            if let Some(group) = slot(&mut groups, id) {
                group.members.push(PointId::new(index));
            }
        }
        groups
    }

    /// Relabels clusters by order of first appearance in the input.
    ///
    /// Two partitions that group the points identically produce the same
    /// canonical labels, whatever ids the runs happened to allocate.
    #[must_use]
    pub fn canonical_labels(&self) -> Vec<usize> {
        let mut renamed = HashMap::with_capacity(self.cluster_count);
        self.points
            .iter()
            .map(|point| {
                let next = renamed.len();
                *renamed.entry(point.cluster()).or_insert(next)
            })
            .collect()
    }

    /// Returns whether `other` groups the same points together, ignoring
    /// coordinates and the specific ids used.
    #[must_use]
    pub fn same_grouping(&self, other: &Self) -> bool {
        self.len() == other.len() && self.canonical_labels() == other.canonical_labels()
    }
}

fn slot<T>(items: &mut [T], id: ClusterId) -> Option<&mut T> {
    let index = usize::try_from(id.get()).ok()?;
    items.get_mut(index)
}

fn used_ids(points: &[Point], limit: usize) -> Vec<bool> {
    let mut used = vec![false; limit];
    for id in points.iter().filter_map(Point::cluster) {
        if let Some(flag) = slot(&mut used, id) {
            *flag = true;
        }
    }
    used
}

fn first_unused(used: &[bool]) -> PartitionError {
    match used.iter().position(|&seen| !seen) {
        Some(0) | None => PartitionError::MissingZero,
        Some(missing) => PartitionError::Gap {
            missing: missing as u64,
        },
    }
}
