use voxclust_core::{ClusterPartition, Clusterer, ClusteringBuilder, Point, PoolStrategy};

#[must_use]
pub fn cloud(coordinates: &[[i32; 3]]) -> Vec<Point> {
    coordinates.iter().copied().map(Point::from).collect()
}

#[must_use]
pub fn clusterer(threshold: f64, strategy: PoolStrategy) -> Clusterer {
    ClusteringBuilder::new()
        .with_threshold(threshold)
        .with_pool_strategy(strategy)
        .build()
        .expect("test thresholds are valid")
}

#[must_use]
pub fn labels(partition: &ClusterPartition) -> Vec<i64> {
    partition.points().iter().map(Point::cluster_label).collect()
}
