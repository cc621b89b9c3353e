//! Shared test utilities for `voxclust-core`.

use proptest::test_runner::Config as ProptestConfig;
use voxclust_test_support::property::ProptestRunProfile;

use crate::{distance::Threshold, point::Point};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `VOXCLUST_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Builds points from raw coordinates.
#[must_use]
pub(crate) fn points(coordinates: &[[i32; 3]]) -> Vec<Point> {
    coordinates.iter().copied().map(Point::from).collect()
}

/// Disjoint-set forest with path compression and union by rank.
#[derive(Clone, Debug)]
pub(crate) struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub(crate) fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != node {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }

    pub(crate) fn union(&mut self, left: usize, right: usize) {
        let mut left = self.find(left);
        let mut right = self.find(right);
        if left == right {
            return;
        }
        let left_rank = self.rank[left];
        let right_rank = self.rank[right];
        if left_rank < right_rank {
            std::mem::swap(&mut left, &mut right);
        }
        self.parent[right] = left;
        if left_rank == right_rank {
            self.rank[left] = left_rank.saturating_add(1);
        }
    }
}

/// Labels the connected components of the threshold graph over `points`,
/// numbering components by first appearance in input order.
///
/// Quadratic in the number of points; only meant for small fixtures.
#[must_use]
pub(crate) fn connected_components(points: &[Point], threshold: Threshold) -> Vec<usize> {
    let mut set = DisjointSet::new(points.len());
    for (left, a) in points.iter().enumerate() {
        for (right, b) in points.iter().enumerate().skip(left + 1) {
            if threshold.admits(&a.coordinate(), &b.coordinate()) {
                set.union(left, right);
            }
        }
    }

    let mut labels = Vec::with_capacity(points.len());
    let mut roots: Vec<usize> = Vec::new();
    for index in 0..points.len() {
        let root = set.find(index);
        let label = match roots.iter().position(|&seen| seen == root) {
            Some(label) => label,
            None => {
                roots.push(root);
                roots.len() - 1
            }
        };
        labels.push(label);
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_follow_first_appearance() {
        let threshold = Threshold::new(1.0).expect("valid threshold");
        let cloud = points(&[[5, 0, 0], [0, 0, 0], [6, 0, 0], [1, 0, 0], [20, 0, 0]]);
        assert_eq!(connected_components(&cloud, threshold), vec![0, 1, 0, 1, 2]);
    }

    #[test]
    fn union_is_transitive() {
        let mut set = DisjointSet::new(4);
        set.union(0, 1);
        set.union(2, 3);
        set.union(1, 3);
        let root = set.find(0);
        assert!((1..4).all(|node| set.find(node) == root));
    }
}
