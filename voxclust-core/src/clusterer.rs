//! Clustering entry point.
//!
//! [`Clusterer`] holds a validated configuration and dispatches each run to
//! a [`RegionGrowthEngine`] over the selected pool.

use tracing::{info, instrument, warn};

use crate::{
    builder::PoolStrategy,
    distance::Threshold,
    engine::{NoProgress, ProgressObserver, RegionGrowthEngine, SeedOrder},
    partition::ClusterPartition,
    point::Point,
    pool::{GridPool, LinearPool},
};

/// Runs fixed-distance region growth over point clouds.
///
/// Runs are infallible: every input, including an empty one, yields a
/// partition.
///
/// # Examples
/// ```
/// use voxclust_core::{ClusteringBuilder, Point};
///
/// let clusterer = ClusteringBuilder::new().with_threshold(1.5).build()?;
/// let partition = clusterer.run(vec![
///     Point::new(0, 0, 0),
///     Point::new(1, 0, 0),
///     Point::new(2, 0, 0),
///     Point::new(9, 0, 0),
/// ]);
/// assert_eq!(partition.cluster_count(), 2);
/// assert_eq!(partition.cluster_sizes(), [3, 1]);
/// # Ok::<(), voxclust_core::ClusterError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Clusterer {
    threshold: Threshold,
    pool_strategy: PoolStrategy,
    seed_order: SeedOrder,
}

impl Clusterer {
    pub(crate) const fn new(
        threshold: Threshold,
        pool_strategy: PoolStrategy,
        seed_order: SeedOrder,
    ) -> Self {
        Self {
            threshold,
            pool_strategy,
            seed_order,
        }
    }

    /// Returns the connection threshold.
    #[must_use]
    pub const fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Returns the pool strategy as configured (before `Auto` is resolved).
    #[must_use]
    pub const fn pool_strategy(&self) -> PoolStrategy {
        self.pool_strategy
    }

    /// Returns the seed order used for runs.
    #[must_use]
    pub const fn seed_order(&self) -> SeedOrder {
        self.seed_order
    }

    /// Clusters `points`, clearing any assignments they already carry.
    #[must_use]
    pub fn run(&self, points: Vec<Point>) -> ClusterPartition {
        self.run_with_progress(points, NoProgress)
    }

    /// Clusters `points`, reporting progress to `observer`.
    #[instrument(
        name = "core.run",
        skip(self, points, observer),
        fields(
            points = points.len(),
            threshold = self.threshold.get(),
            pool = ?self.pool_strategy.resolve(),
            seed_order = ?self.seed_order,
        ),
    )]
    pub fn run_with_progress<O>(&self, points: Vec<Point>, observer: O) -> ClusterPartition
    where
        O: ProgressObserver,
    {
        if points.is_empty() {
            warn!("no points to cluster, returning an empty partition");
        }
        let total = points.len();
        let partition = match self.pool_strategy.resolve() {
            PoolStrategy::Linear => self.engine::<LinearPool>(points).run(observer),
            PoolStrategy::Auto | PoolStrategy::Grid => {
                self.engine::<GridPool>(points).run(observer)
            }
        };
        info!(
            points = total,
            clusters = partition.cluster_count(),
            max_cluster = partition.max_cluster_label(),
            "clustering completed"
        );
        partition
    }

    fn engine<P: crate::pool::CandidatePool>(&self, points: Vec<Point>) -> RegionGrowthEngine<P> {
        RegionGrowthEngine::with_seed_order(points, self.threshold, self.seed_order)
    }
}
