//! Benchmark setup error type.

use crate::synthetic::SyntheticError;
use voxclust_core::ClusterError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic cloud generation failed.
    #[error("synthetic cloud generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// The clustering configuration was rejected.
    #[error("clustering configuration failed: {0}")]
    Core(#[from] ClusterError),
}
