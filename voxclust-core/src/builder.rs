//! Builder utilities for configuring [`Clusterer`] instances.
//!
//! Exposes the pool selection surface and the validation performed before a
//! [`Clusterer`] is constructed.

use crate::{
    Result,
    clusterer::Clusterer,
    distance::{DEFAULT_THRESHOLD, Threshold},
    engine::SeedOrder,
};

/// Selects the candidate pool a [`Clusterer`] drains.
///
/// `Auto` resolves deterministically to [`PoolStrategy::Grid`]; both pools
/// produce the same grouping, the grid just avoids rescanning the whole pool
/// for every frontier point.
///
/// # Examples
/// ```
/// use voxclust_core::PoolStrategy;
///
/// assert_eq!(PoolStrategy::Auto.resolve(), PoolStrategy::Grid);
/// assert_eq!(PoolStrategy::Linear.resolve(), PoolStrategy::Linear);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PoolStrategy {
    /// Let the library pick.
    #[default]
    Auto,
    /// Scan every remaining point per query ([`crate::LinearPool`]).
    Linear,
    /// Query the neighbouring cells of a spatial hash ([`crate::GridPool`]).
    Grid,
}

impl PoolStrategy {
    /// Returns the concrete strategy `self` stands for.
    #[must_use]
    pub const fn resolve(self) -> Self {
        match self {
            Self::Auto | Self::Grid => Self::Grid,
            Self::Linear => Self::Linear,
        }
    }
}

/// Configures and constructs [`Clusterer`] instances.
///
/// # Examples
/// ```
/// use voxclust_core::{ClusteringBuilder, PoolStrategy};
///
/// let clusterer = ClusteringBuilder::new()
///     .with_threshold(2.5)
///     .with_pool_strategy(PoolStrategy::Linear)
///     .with_seed(Some(7))
///     .build()?;
/// assert_eq!(clusterer.threshold().get(), 2.5);
/// assert_eq!(clusterer.pool_strategy(), PoolStrategy::Linear);
/// # Ok::<(), voxclust_core::ClusterError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ClusteringBuilder {
    threshold: f64,
    pool_strategy: PoolStrategy,
    seed: Option<u64>,
}

impl Default for ClusteringBuilder {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            pool_strategy: PoolStrategy::Auto,
            seed: None,
        }
    }
}

impl ClusteringBuilder {
    /// Creates a builder populated with default parameters: a `√2`
    /// threshold, automatic pool selection and input-order seeds.
    ///
    /// # Examples
    /// ```
    /// use voxclust_core::{ClusteringBuilder, PoolStrategy};
    ///
    /// let builder = ClusteringBuilder::new();
    /// assert_eq!(builder.threshold(), std::f64::consts::SQRT_2);
    /// assert_eq!(builder.pool_strategy(), PoolStrategy::Auto);
    /// assert_eq!(builder.seed(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the connection threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Returns the configured threshold.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Sets the pool used during runs.
    #[must_use]
    pub const fn with_pool_strategy(mut self, strategy: PoolStrategy) -> Self {
        self.pool_strategy = strategy;
        self
    }

    /// Returns the configured pool strategy.
    #[must_use]
    pub const fn pool_strategy(&self) -> PoolStrategy {
        self.pool_strategy
    }

    /// Shuffles the seed order with the given RNG seed; `None` keeps input
    /// order. Cluster ids may change, the grouping does not.
    #[must_use]
    pub const fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured RNG seed.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration and constructs a [`Clusterer`].
    ///
    /// # Errors
    /// Returns [`crate::ClusterError::InvalidThreshold`] when the threshold is
    /// negative, NaN or infinite.
    ///
    /// # Examples
    /// ```
    /// use voxclust_core::{ClusterError, ClusteringBuilder};
    ///
    /// let err = ClusteringBuilder::new().with_threshold(-1.0).build().unwrap_err();
    /// assert!(matches!(err, ClusterError::InvalidThreshold { .. }));
    /// ```
    pub fn build(self) -> Result<Clusterer> {
        let threshold = Threshold::new(self.threshold)?;
        let order = self.seed.map_or(SeedOrder::Input, SeedOrder::Shuffled);
        Ok(Clusterer::new(threshold, self.pool_strategy, order))
    }
}
