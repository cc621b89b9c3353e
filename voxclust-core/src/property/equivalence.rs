//! Oracle equivalence: every pool and seed order reproduces the connected
//! components of the threshold graph.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{
    builder::{ClusteringBuilder, PoolStrategy},
    test_utils::connected_components,
};

use super::types::CloudFixture;

/// Runs the oracle equivalence property for the given fixture and seed.
pub(super) fn run_oracle_equivalence_property(fixture: &CloudFixture, seed: u64) -> TestCaseResult {
    let mut expected = None;
    for strategy in [PoolStrategy::Linear, PoolStrategy::Grid] {
        for order in [None, Some(seed)] {
            let clusterer = ClusteringBuilder::new()
                .with_threshold(fixture.threshold)
                .with_pool_strategy(strategy)
                .with_seed(order)
                .build()
                .map_err(|err| TestCaseError::fail(format!("build failed: {err}")))?;
            let expected = expected.get_or_insert_with(|| {
                connected_components(&fixture.points, clusterer.threshold())
            });
            let labels = clusterer.run(fixture.points.clone()).canonical_labels();
            if labels != *expected {
                return Err(TestCaseError::fail(format!(
                    "grouping mismatch: pool={strategy:?}, seed={order:?}, \
                     shape={:?}, points={}, threshold={}",
                    fixture.shape,
                    fixture.points.len(),
                    fixture.threshold,
                )));
            }
        }
    }
    Ok(())
}
