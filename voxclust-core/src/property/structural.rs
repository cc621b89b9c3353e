//! Structural invariants of a partition:
//!
//! - every point is assigned and keeps its coordinate and position;
//! - ids form the contiguous range `0..cluster_count` and sizes sum to the
//!   point count;
//! - no two clusters hold points within the threshold of each other;
//! - re-clustering the output reproduces the grouping.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{builder::ClusteringBuilder, distance::Threshold, partition::ClusterPartition};

use super::types::CloudFixture;

/// Runs the structural invariant property for the given fixture.
pub(super) fn run_structural_invariants_property(fixture: &CloudFixture) -> TestCaseResult {
    let clusterer = ClusteringBuilder::new()
        .with_threshold(fixture.threshold)
        .build()
        .map_err(|err| TestCaseError::fail(format!("build failed: {err}")))?;
    let partition = clusterer.run(fixture.points.clone());

    validate_positions(fixture, &partition)?;
    validate_ids(&partition)?;
    validate_separation(fixture, &partition)?;

    let again = clusterer.run(partition.points().to_vec());
    if partition != again {
        return Err(TestCaseError::fail(format!(
            "re-clustering changed the result (shape={:?})",
            fixture.shape
        )));
    }
    Ok(())
}

fn validate_positions(fixture: &CloudFixture, partition: &ClusterPartition) -> TestCaseResult {
    if partition.len() != fixture.points.len() {
        return Err(TestCaseError::fail(format!(
            "partition holds {} points, input had {}",
            partition.len(),
            fixture.points.len()
        )));
    }
    for (index, (input, output)) in fixture.points.iter().zip(partition.points()).enumerate() {
        if input.coordinate() != output.coordinate() {
            return Err(TestCaseError::fail(format!("point {index} moved")));
        }
        if !output.is_assigned() {
            return Err(TestCaseError::fail(format!("point {index} is unassigned")));
        }
    }
    Ok(())
}

fn validate_ids(partition: &ClusterPartition) -> TestCaseResult {
    let sizes = partition.cluster_sizes();
    if sizes.iter().any(|&size| size == 0) {
        return Err(TestCaseError::fail(format!("empty cluster in {sizes:?}")));
    }
    if sizes.iter().sum::<usize>() != partition.len() {
        return Err(TestCaseError::fail("cluster sizes do not cover the input"));
    }
    let rebuilt = ClusterPartition::try_from_points(partition.points().to_vec())
        .map_err(|err| TestCaseError::fail(format!("ids are not contiguous: {err}")))?;
    if rebuilt.cluster_count() != partition.cluster_count() {
        return Err(TestCaseError::fail("cluster count disagrees with the ids"));
    }
    Ok(())
}

fn validate_separation(fixture: &CloudFixture, partition: &ClusterPartition) -> TestCaseResult {
    let points = partition.points();
    let threshold = Threshold::new(fixture.threshold)
        .map_err(|err| TestCaseError::fail(format!("invalid threshold: {err}")))?;
    for (left, a) in points.iter().enumerate() {
        for (right, b) in points.iter().enumerate().skip(left + 1) {
            if a.cluster() != b.cluster() && threshold.admits(&a.coordinate(), &b.coordinate()) {
                return Err(TestCaseError::fail(format!(
                    "points {left} and {right} are linked but split across clusters"
                )));
            }
        }
    }
    Ok(())
}
