//! voxclust core library.
//!
//! Partitions integer 3D points into clusters whose members are connected
//! through chains of points no farther apart than a fixed threshold.
//! Clusters are grown breadth-first from seeds drawn out of a
//! [`CandidatePool`] until the pool is empty; cluster ids are allocated
//! sequentially from `0` in discovery order.
//!
//! # Metrics
//!
//! When the `metrics` feature is enabled the engine emits:
//!
//! - `voxclust_clusters_discovered` (counter)
//! - `voxclust_points_assigned` (counter)
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod clusterer;
mod distance;
mod engine;
mod error;
mod partition;
mod point;
mod pool;

#[cfg(test)]
mod property;
#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::{ClusteringBuilder, PoolStrategy},
    clusterer::Clusterer,
    distance::{DEFAULT_THRESHOLD, Threshold, euclidean_distance, squared_distance},
    engine::{
        EngineState, GrownCluster, NoProgress, Progress, ProgressObserver, RegionGrowthEngine,
        SeedOrder,
    },
    error::{ClusterError, ClusterErrorCode, PartitionError, PartitionErrorCode, Result},
    partition::{ClusterId, ClusterMembers, ClusterPartition},
    point::{Coordinate, Point, PointId, UNASSIGNED_LABEL},
    pool::{Candidate, CandidatePool, GridPool, LinearPool},
};
