//! Benchmark support crate for voxclust.
//!
//! Provides synthetic point clouds and parameter types used by the Criterion
//! region-growth benchmarks.

pub mod error;
pub mod params;
pub mod synthetic;
