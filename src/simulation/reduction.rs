use std::cmp::Ordering;

use crate::{
    candidate_pool::CandidatePool, concurrency::par_iter_reduce0, event::Event, floating_type_mod::FT,
};

/// A finite entry of the candidate pool. `key` is the slot index in scan
/// order: pair `(i, j)` is `i * n + j`, the wall entry of `i` is `n * n + i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub time: FT,
    pub key: usize,
}

impl Candidate {
    /// Total order on `(time, key)`. Equal times resolve to the slot scanned first.
    pub fn cmp_order(&self, other: &Candidate) -> Ordering {
        self.time.total_cmp(&other.time).then(self.key.cmp(&other.key))
    }

    pub fn earlier(a: Option<Candidate>, b: Option<Candidate>) -> Option<Candidate> {
        match (a, b) {
            (Some(a), Some(b)) => Some(if b.cmp_order(&a) == Ordering::Less { b } else { a }),
            (a, None) => a,
            (None, b) => b,
        }
    }
}

/// Winner of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reduction {
    pub time: FT,
    pub event: Event,
}

/// Translates a pool slot into the event it stands for.
pub fn event_for_key(pool: &CandidatePool, key: usize) -> Event {
    let n = pool.num_particles();
    if key < n * n {
        Event::pair(key / n, key % n)
    } else {
        let i = key - n * n;
        Event::wall(i, pool.wall_kinds[i])
    }
}

/// Smallest finite time of the pool and its event, `None` if every entry is
/// infinite (or NaN).
///
/// The parallel reduce combines partial results with [`Candidate::cmp_order`],
/// which is associative and commutative, so the winner is the same for every
/// split of the index range and every thread count. Only one event is
/// returned even if several slots share the minimum.
pub fn find_minimum(pool: &CandidatePool) -> Option<Reduction> {
    let best = par_iter_reduce0(
        pool.len(),
        || None,
        Candidate::earlier,
        |key| {
            let time = pool.time_at(key);
            if time.is_finite() {
                Some(Candidate { time, key })
            } else {
                None
            }
        },
    );

    best.map(|c| Reduction {
        time: c.time,
        event: event_for_key(pool, c.key),
    })
}
