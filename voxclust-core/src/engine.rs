//! Breadth-first region growth over a [`CandidatePool`].
//!
//! The engine moves through three states:
//!
//! - [`EngineState::Idle`]: between clusters. Asking the pool for a seed
//!   either starts a new cluster or, when the pool is empty, finishes the run.
//! - [`EngineState::GrowingCluster`]: the seed has the freshly allocated id
//!   and sits alone in a FIFO frontier. Each frontier point is popped, the
//!   pool surrenders everything within the threshold of it, and those points
//!   take the current id and join the back of the frontier. An empty frontier
//!   returns the engine to `Idle`.
//! - [`EngineState::Done`]: the pool is drained and every point is assigned.
//!
//! A point leaves the pool at the moment it is discovered, so it is queried
//! at most once and can never join a second cluster. Each growth episode
//! runs to an empty frontier, which means a cluster is complete before the
//! next seed is drawn, and the resulting grouping is the set of connected
//! components whatever order the seeds come in.

use std::collections::VecDeque;

use rand::{SeedableRng, rngs::SmallRng, seq::SliceRandom};
use tracing::{debug, instrument, trace};

use crate::{
    distance::Threshold,
    partition::{ClusterId, ClusterPartition},
    point::{Point, PointId},
    pool::{Candidate, CandidatePool},
};

/// Where the engine is in its run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// Waiting to draw the next seed.
    Idle,
    /// Expanding the frontier of the given cluster.
    GrowingCluster(ClusterId),
    /// The pool is empty; no more clusters will be produced.
    Done,
}

/// Order in which seeds are drawn from the pool.
///
/// Any order yields the same grouping; only the cluster numbering changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SeedOrder {
    /// Seeds follow input order.
    #[default]
    Input,
    /// Seeds follow a permutation of the input drawn from the given seed.
    Shuffled(u64),
}

/// Snapshot of how far a run has progressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    /// Points that already carry a cluster id.
    pub assigned: usize,
    /// Points in the run.
    pub total: usize,
    /// Clusters allocated so far, including the one being grown.
    pub clusters: usize,
}

impl Progress {
    /// Points still waiting in the pool.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.total.saturating_sub(self.assigned)
    }
}

/// Receives [`Progress`] snapshots after every batch of assignments.
pub trait ProgressObserver {
    /// Called with the latest counts.
    fn observe(&mut self, progress: Progress);
}

impl<F> ProgressObserver for F
where
    F: FnMut(Progress),
{
    fn observe(&mut self, progress: Progress) {
        self(progress);
    }
}

/// Observer that ignores every update.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn observe(&mut self, _progress: Progress) {}
}

/// Summary of one fully grown cluster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrownCluster {
    /// Identifier allocated to the cluster.
    pub id: ClusterId,
    /// Point the cluster was grown from.
    pub seed: PointId,
    /// Number of member points, seed included.
    pub size: usize,
}

/// Drains a pool into clusters.
///
/// The engine owns both the points and the pool for the whole run. It can be
/// driven one cluster at a time as an [`Iterator`] of [`GrownCluster`]s, or
/// run to completion with [`RegionGrowthEngine::run`].
///
/// # Examples
/// ```
/// use voxclust_core::{LinearPool, Point, RegionGrowthEngine, Threshold};
///
/// let points = vec![Point::new(0, 0, 0), Point::new(1, 0, 0), Point::new(5, 0, 0)];
/// let mut engine = RegionGrowthEngine::<LinearPool>::new(points, Threshold::new(1.5)?);
///
/// let first = engine.next().expect("two clusters remain");
/// assert_eq!((first.id.get(), first.size), (0, 2));
/// assert_eq!(engine.remaining(), 1);
///
/// let partition = engine.into_partition();
/// assert_eq!(partition.cluster_count(), 2);
/// assert_eq!(partition.max_cluster_label(), 1);
/// # Ok::<(), voxclust_core::ClusterError>(())
/// ```
#[derive(Debug)]
pub struct RegionGrowthEngine<P> {
    points: Vec<Point>,
    pool: P,
    threshold: Threshold,
    frontier: VecDeque<Candidate>,
    state: EngineState,
    next_id: ClusterId,
    assigned: usize,
}

impl<P: CandidatePool> RegionGrowthEngine<P> {
    /// Loads every point into a fresh pool, drawing seeds in input order.
    ///
    /// Existing assignments on `points` are cleared.
    #[must_use]
    pub fn new(points: Vec<Point>, threshold: Threshold) -> Self {
        Self::with_seed_order(points, threshold, SeedOrder::Input)
    }

    /// Loads every point into a fresh pool, drawing seeds in `order`.
    ///
    /// Existing assignments on `points` are cleared.
    #[must_use]
    pub fn with_seed_order(points: Vec<Point>, threshold: Threshold, order: SeedOrder) -> Self {
        let points: Vec<Point> = points.into_iter().map(Point::unassigned).collect();
        let mut candidates = Candidate::from_points(&points);
        if let SeedOrder::Shuffled(seed) = order {
            candidates.shuffle(&mut SmallRng::seed_from_u64(seed));
        }
        let pool = P::load(candidates, threshold);
        Self {
            points,
            pool,
            threshold,
            frontier: VecDeque::new(),
            state: EngineState::Idle,
            next_id: ClusterId::new(0),
            assigned: 0,
        }
    }

    /// Current state. Between calls this is `Idle` or `Done`.
    #[must_use]
    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// Points still in the pool.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    /// Current progress counts.
    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress {
            assigned: self.assigned,
            total: self.points.len(),
            clusters: clusters_allocated(self.next_id),
        }
    }

    /// Grows the next cluster to completion, reporting progress to
    /// `observer`. Returns `None` once the pool is empty.
    pub fn grow_next<O>(&mut self, observer: &mut O) -> Option<GrownCluster>
    where
        O: ProgressObserver + ?Sized,
    {
        if self.state == EngineState::Done {
            return None;
        }
        let Some(seed) = self.pool.extract_any() else {
            self.state = EngineState::Done;
            return None;
        };
        let id = self.next_id;
        self.next_id = id.next();
        self.state = EngineState::GrowingCluster(id);
        let size = self.grow_from(seed, id, observer);
        self.state = EngineState::Idle;
        Some(GrownCluster {
            id,
            seed: seed.id,
            size,
        })
    }

    #[instrument(
        name = "core.grow_cluster",
        level = "trace",
        skip_all,
        fields(cluster = %id, seed = %seed.id),
    )]
    fn grow_from<O>(&mut self, seed: Candidate, id: ClusterId, observer: &mut O) -> usize
    where
        O: ProgressObserver + ?Sized,
    {
        self.assign(seed.id, id);
        let mut size = 1_usize;
        observer.observe(self.progress());

        self.frontier.push_back(seed);
        while let Some(current) = self.frontier.pop_front() {
            let discovered = self.pool.extract_within(&current.coordinate, self.threshold);
            if discovered.is_empty() {
                continue;
            }
            for neighbour in &discovered {
                trace!(point = %neighbour.id, from = %current.id, "neighbour discovered");
                self.assign(neighbour.id, id);
            }
            size += discovered.len();
            self.frontier.extend(discovered);
            observer.observe(self.progress());
        }

        #[cfg(feature = "metrics")]
        {
            metrics::counter!("voxclust_clusters_discovered").increment(1);
            metrics::counter!("voxclust_points_assigned").increment(size as u64);
        }
        debug!(cluster = %id, size, remaining = self.pool.len(), "cluster grown");
        size
    }

    fn assign(&mut self, point: PointId, id: ClusterId) {
        if let Some(target) = self.points.get_mut(point.index()) {
            target.assign(id);
            self.assigned += 1;
        }
    }

    /// Runs to completion, reporting progress to `observer`.
    pub fn run<O>(mut self, mut observer: O) -> ClusterPartition
    where
        O: ProgressObserver,
    {
        while self.grow_next(&mut observer).is_some() {}
        self.finish()
    }

    /// Runs any remaining growth and returns the partition.
    #[must_use]
    pub fn into_partition(self) -> ClusterPartition {
        self.run(NoProgress)
    }

    fn finish(self) -> ClusterPartition {
        let clusters = clusters_allocated(self.next_id);
        ClusterPartition::from_engine(self.points, clusters)
    }
}

impl<P: CandidatePool> Iterator for RegionGrowthEngine<P> {
    type Item = GrownCluster;

    fn next(&mut self) -> Option<Self::Item> {
        self.grow_next(&mut NoProgress)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "one id is allocated per point, so the count fits in usize"
)]
const fn clusters_allocated(next_id: ClusterId) -> usize {
    next_id.get() as usize
}
