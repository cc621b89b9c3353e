//! Brute-force pool backed by a single vector.

use crate::{distance::Threshold, point::Coordinate};

use super::{Candidate, CandidatePool};

/// Pool that scans every remaining candidate on each radius query.
///
/// Candidates are stored in reverse load order so that seeds pop off the
/// tail; radius queries compact the vector in place and keep the relative
/// order of the survivors.
///
/// # Examples
/// ```
/// use voxclust_core::{Candidate, CandidatePool, LinearPool, Point, Threshold};
///
/// let points = [Point::new(0, 0, 0), Point::new(1, 0, 0), Point::new(9, 0, 0)];
/// let mut pool = LinearPool::new(Candidate::from_points(&points));
///
/// let seed = pool.extract_any().expect("pool is not empty");
/// assert_eq!(seed.id.index(), 0);
///
/// let found = pool.extract_within(&seed.coordinate, Threshold::new(1.5)?);
/// assert_eq!(found.len(), 1);
/// assert_eq!(pool.len(), 1);
/// # Ok::<(), voxclust_core::ClusterError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct LinearPool {
    remaining: Vec<Candidate>,
}

impl LinearPool {
    /// Loads `candidates`; the first one is the first seed handed out.
    #[must_use]
    pub fn new(candidates: Vec<Candidate>) -> Self {
        let mut remaining = candidates;
        remaining.reverse();
        Self { remaining }
    }
}

impl CandidatePool for LinearPool {
    fn load(candidates: Vec<Candidate>, _radius: Threshold) -> Self {
        Self::new(candidates)
    }

    fn len(&self) -> usize {
        self.remaining.len()
    }

    fn extract_any(&mut self) -> Option<Candidate> {
        self.remaining.pop()
    }

    fn extract_within(&mut self, center: &Coordinate, radius: Threshold) -> Vec<Candidate> {
        let mut found = Vec::new();
        self.remaining.retain(|candidate| {
            if radius.admits(center, &candidate.coordinate) {
                found.push(*candidate);
                false
            } else {
                true
            }
        });
        found
    }
}
