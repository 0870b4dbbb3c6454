use crate::{event::CollisionType, floating_type_mod::FT};

/// Per-tick scratch space: the N x N pair matrix (row-major) and one wall
/// entry per particle. Nothing in here survives a [`CandidatePool::reset`].
#[derive(Debug, Clone)]
pub struct CandidatePool {
    num_particles: usize,
    pub pair_times: Vec<FT>,
    pub wall_times: Vec<FT>,
    pub wall_kinds: Vec<CollisionType>,
}

impl CandidatePool {
    pub fn new(num_particles: usize) -> Self {
        CandidatePool {
            num_particles,
            pair_times: vec![FT::INFINITY; num_particles * num_particles],
            wall_times: vec![FT::INFINITY; num_particles],
            wall_kinds: vec![CollisionType::None; num_particles],
        }
    }

    pub fn num_particles(&self) -> usize {
        self.num_particles
    }

    /// Total number of candidate slots (pairs then walls).
    pub fn len(&self) -> usize {
        self.pair_times.len() + self.wall_times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn reset(&mut self) {
        self.pair_times.iter_mut().for_each(|t| *t = FT::INFINITY);
        self.wall_times.iter_mut().for_each(|t| *t = FT::INFINITY);
        self.wall_kinds.iter_mut().for_each(|k| *k = CollisionType::None);
    }

    #[inline(always)]
    pub fn pair_time(&self, i: usize, j: usize) -> FT {
        self.pair_times[i * self.num_particles + j]
    }

    /// Time stored at linear slot `key` (the scan order of the reducer).
    #[inline(always)]
    pub fn time_at(&self, key: usize) -> FT {
        let num_pairs = self.pair_times.len();
        if key < num_pairs {
            self.pair_times[key]
        } else {
            self.wall_times[key - num_pairs]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_clears_every_slot() {
        let mut pool = CandidatePool::new(3);
        pool.pair_times[4] = 1.;
        pool.wall_times[2] = 2.;
        pool.wall_kinds[2] = CollisionType::ParticleWallY;
        pool.reset();
        assert!(pool.pair_times.iter().all(|t| *t == FT::INFINITY));
        assert!(pool.wall_times.iter().all(|t| *t == FT::INFINITY));
        assert!(pool.wall_kinds.iter().all(|k| *k == CollisionType::None));
    }

    #[test]
    fn linear_keys_cover_pairs_then_walls() {
        let mut pool = CandidatePool::new(2);
        pool.pair_times[1] = 5.;
        pool.wall_times[1] = 7.;
        assert_eq!(pool.len(), 6);
        assert_eq!(pool.pair_time(0, 1), 5.);
        assert_eq!(pool.time_at(1), 5.);
        assert_eq!(pool.time_at(5), 7.);
        assert_eq!(pool.time_at(4), FT::INFINITY);
    }
}
