//! Strategy builders for region-growth property tests.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::point::Point;

use super::types::{CloudFixture, CloudShape};

/// Maximum number of points in a generated cloud. The oracle is quadratic.
const MAX_POINTS: usize = 96;

/// Generates cloud fixtures covering every [`CloudShape`].
pub(super) fn cloud_fixture_strategy() -> impl Strategy<Value = CloudFixture> {
    let shape = prop_oneof![
        Just(CloudShape::Scattered),
        Just(CloudShape::Chains),
        Just(CloudShape::Blobs),
        Just(CloudShape::Lattice),
    ];
    (shape, any::<u64>()).prop_map(|(shape, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(shape, &mut rng)
    })
}

/// Generates a fixture for a specific shape.
pub(super) fn generate_fixture(shape: CloudShape, rng: &mut SmallRng) -> CloudFixture {
    match shape {
        CloudShape::Scattered => generate_scattered(rng),
        CloudShape::Chains => generate_chains(rng),
        CloudShape::Blobs => generate_blobs(rng),
        CloudShape::Lattice => generate_lattice(rng),
    }
}

fn generate_scattered(rng: &mut SmallRng) -> CloudFixture {
    let count = rng.gen_range(0..=MAX_POINTS);
    let extent = rng.gen_range(2..=12);
    let points = (0..count)
        .map(|_| {
            Point::new(
                rng.gen_range(-extent..=extent),
                rng.gen_range(-extent..=extent),
                rng.gen_range(-extent..=extent),
            )
        })
        .collect();
    CloudFixture {
        points,
        threshold: rng.gen_range(0.0..3.5),
        shape: CloudShape::Scattered,
    }
}

fn generate_chains(rng: &mut SmallRng) -> CloudFixture {
    let chains: usize = rng.gen_range(1..=6);
    let mut points = Vec::new();
    for chain in 0..chains {
        let length = rng.gen_range(1..=MAX_POINTS / chains);
        let axis = rng.gen_range(0..3);
        let offset = i32::try_from(chain).unwrap_or(0) * 1_000 - 3_000;
        let origin = [offset, rng.gen_range(-50..=50), 0];
        for step in 0..length {
            let mut coordinate = origin;
            coordinate[axis] += i32::try_from(step).unwrap_or(i32::MAX);
            points.push(Point::from_coordinate(coordinate));
        }
    }
    points.shuffle(rng);
    CloudFixture {
        points,
        threshold: 1.0,
        shape: CloudShape::Chains,
    }
}

fn generate_blobs(rng: &mut SmallRng) -> CloudFixture {
    let blobs: i32 = rng.gen_range(1..=5);
    let mut points = Vec::new();
    for blob in 0..blobs {
        let centre = [blob * 10_000, -blob * 7_000, blob * 3];
        for _ in 0..rng.gen_range(1..=MAX_POINTS / 5) {
            points.push(Point::new(
                centre[0] + rng.gen_range(-2..=2),
                centre[1] + rng.gen_range(-2..=2),
                centre[2] + rng.gen_range(-2..=2),
            ));
        }
    }
    points.shuffle(rng);
    CloudFixture {
        points,
        threshold: rng.gen_range(1.0..4.0),
        shape: CloudShape::Blobs,
    }
}

fn generate_lattice(rng: &mut SmallRng) -> CloudFixture {
    let count = rng.gen_range(1..=MAX_POINTS);
    let points = (0..count)
        .map(|_| Point::new(rng.gen_range(0..5), rng.gen_range(0..5), rng.gen_range(0..5)))
        .collect();
    let threshold = if rng.gen_bool(0.5) {
        std::f64::consts::SQRT_2
    } else {
        3.0_f64.sqrt()
    };
    CloudFixture {
        points,
        threshold,
        shape: CloudShape::Lattice,
    }
}
