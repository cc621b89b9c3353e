//! Spatial hash pool.

use std::collections::{HashMap, hash_map::Entry};

use crate::{distance::Threshold, point::Coordinate};

use super::{Candidate, CandidatePool};

type CellKey = [i64; 3];

/// Largest useful cell edge: `i32` coordinates span fewer than `2^32` units.
const MAX_CELL_EDGE: f64 = 4_294_967_296.0;

/// Cap on the per-axis cell reach of one query before falling back to
/// visiting every occupied cell.
const MAX_REACH: i64 = 1 << 20;

/// Pool that buckets candidates into cubic cells.
///
/// The cell edge is `max(1, ceil(radius))` for the radius the pool was sized
/// for, so a query with that radius only inspects the 3x3x3 block of cells
/// around its centre. Larger query radii widen the block; when the block
/// would hold more cells than are occupied, the query visits the occupied
/// cells instead.
///
/// # Examples
/// ```
/// use voxclust_core::{Candidate, CandidatePool, GridPool, Point, Threshold};
///
/// let radius = Threshold::new(1.5)?;
/// let points = [Point::new(0, 0, 0), Point::new(1, 1, 0), Point::new(40, 0, 0)];
/// let mut pool = GridPool::new(Candidate::from_points(&points), radius);
///
/// let seed = pool.extract_any().expect("pool is not empty");
/// let found = pool.extract_within(&seed.coordinate, radius);
/// assert_eq!(found.iter().map(|c| c.id.index()).collect::<Vec<_>>(), [1]);
/// assert_eq!(pool.len(), 1);
/// # Ok::<(), voxclust_core::ClusterError>(())
/// ```
#[derive(Clone, Debug)]
pub struct GridPool {
    edge: i64,
    cells: HashMap<CellKey, Vec<Candidate>>,
    // Reverse load order; may still hold candidates already taken by a
    // radius query; `live` filters those out.
    seeds: Vec<Candidate>,
    live: Vec<bool>,
    len: usize,
}

impl GridPool {
    /// Loads `candidates` into cells sized for queries of `radius`. The
    /// first candidate is the first seed handed out.
    #[must_use]
    pub fn new(candidates: Vec<Candidate>, radius: Threshold) -> Self {
        let edge = cell_edge(radius);
        let slots = candidates
            .iter()
            .map(|candidate| candidate.id.index().saturating_add(1))
            .max()
            .unwrap_or(0);
        let mut live = vec![false; slots];
        let mut cells: HashMap<CellKey, Vec<Candidate>> = HashMap::new();
        for candidate in &candidates {
            if let Some(flag) = live.get_mut(candidate.id.index()) {
                *flag = true;
            }
            cells
                .entry(cell_key(&candidate.coordinate, edge))
                .or_default()
                .push(*candidate);
        }
        let len = candidates.len();
        let mut seeds = candidates;
        seeds.reverse();
        Self {
            edge,
            cells,
            seeds,
            live,
            len,
        }
    }

    /// Edge length of one cell.
    #[must_use]
    pub const fn cell_edge(&self) -> i64 {
        self.edge
    }

    /// Number of cells that still hold candidates.
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    fn retire(&mut self, candidate: &Candidate) -> bool {
        match self.live.get_mut(candidate.id.index()) {
            Some(flag) if *flag => {
                *flag = false;
                true
            }
            _ => false,
        }
    }

    fn keys_near(&self, center: &Coordinate, radius: Threshold) -> Vec<CellKey> {
        let reach = cell_reach(radius, self.edge);
        let side = u128::from(reach.unsigned_abs()) * 2 + 1;
        if reach >= MAX_REACH || side * side * side > self.cells.len() as u128 {
            let mut keys: Vec<CellKey> = self.cells.keys().copied().collect();
            keys.sort_unstable();
            return keys;
        }

        let origin = cell_key(center, self.edge);
        let mut keys = Vec::new();
        for dx in -reach..=reach {
            for dy in -reach..=reach {
                for dz in -reach..=reach {
                    keys.push([origin[0] + dx, origin[1] + dy, origin[2] + dz]);
                }
            }
        }
        keys
    }
}

impl CandidatePool for GridPool {
    fn load(candidates: Vec<Candidate>, radius: Threshold) -> Self {
        Self::new(candidates, radius)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn extract_any(&mut self) -> Option<Candidate> {
        while let Some(seed) = self.seeds.pop() {
            if !self.retire(&seed) {
                continue;
            }
            let key = cell_key(&seed.coordinate, self.edge);
            if let Entry::Occupied(mut slot) = self.cells.entry(key) {
                let cell = slot.get_mut();
                if let Some(position) = cell.iter().position(|member| member.id == seed.id) {
                    cell.swap_remove(position);
                }
                if cell.is_empty() {
                    slot.remove();
                }
            }
            self.len -= 1;
            return Some(seed);
        }
        None
    }

    fn extract_within(&mut self, center: &Coordinate, radius: Threshold) -> Vec<Candidate> {
        let mut found = Vec::new();
        for key in self.keys_near(center, radius) {
            let Entry::Occupied(mut slot) = self.cells.entry(key) else {
                continue;
            };
            slot.get_mut().retain(|candidate| {
                if radius.admits(center, &candidate.coordinate) {
                    found.push(*candidate);
                    false
                } else {
                    true
                }
            });
            if slot.get().is_empty() {
                slot.remove();
            }
        }
        for candidate in &found {
            self.retire(candidate);
        }
        self.len -= found.len();
        found
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "the edge is clamped to [1, 2^32] before the cast"
)]
fn cell_edge(radius: Threshold) -> i64 {
    radius.get().ceil().clamp(1.0, MAX_CELL_EDGE) as i64
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "the reach is clamped to MAX_REACH before the cast"
)]
fn cell_reach(radius: Threshold, edge: i64) -> i64 {
    (radius.get() / edge as f64).ceil().min(MAX_REACH as f64) as i64
}

fn cell_key(coordinate: &Coordinate, edge: i64) -> CellKey {
    coordinate.map(|axis| i64::from(axis).div_euclid(edge))
}
