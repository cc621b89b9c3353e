//! Benchmark parameter types.

use std::fmt;

use voxclust_core::PoolStrategy;

/// Parameters for one region-growth benchmark run.
#[derive(Clone, Debug)]
pub struct RegionGrowthParams {
    /// Number of points in the cloud.
    pub point_count: usize,
    /// Pool under test.
    pub pool: PoolStrategy,
}

impl fmt::Display for RegionGrowthParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},pool={:?}", self.point_count, self.pool.resolve())
    }
}
