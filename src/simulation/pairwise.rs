use crate::{
    candidate_pool::CandidatePool, concurrency::par_chunks_mut1, floating_type_mod::FT, particle::Particle,
};

/// Earliest time `t >= 0` at which the centres of `pi` and `pj` are exactly
/// `contact_distance` apart, or infinity if that never happens.
///
/// Solves `a t^2 + b t + c = 0` with `a = |dv|^2`, `b = 2 dp.dv` and
/// `c = |dp|^2 - contact_distance^2`. Pairs that are not approaching
/// (`b >= 0`) never collide, even when touching. For an approaching pair
/// that already overlaps (`c < 0`) the roots have opposite signs and the
/// non-negative one, where the centres are `contact_distance` apart again,
/// is returned.
///
/// The result only depends on `a`, `b`, `c`, which are invariant under
/// swapping the particles, so `t(i, j) == t(j, i)` bit for bit.
#[inline(always)]
pub fn pair_contact_time(pi: &Particle, pj: &Particle, contact_distance: FT) -> FT {
    let dp = pj.position - pi.position;
    let dv = pj.velocity - pi.velocity;

    let a = dv.norm_squared();
    if a == 0. {
        return FT::INFINITY;
    }

    let b = 2. * dp.dot(&dv);
    if b >= 0. {
        return FT::INFINITY;
    }

    let c = dp.norm_squared() - contact_distance * contact_distance;
    let discriminant = b * b - 4. * a * c;
    if discriminant < 0. {
        return FT::INFINITY;
    }

    // q > 0 since b < 0; t- = 2c / q avoids cancellation for nearly touching pairs
    let q = -b + discriminant.sqrt();
    let t = if c >= 0. { 2. * c / q } else { q / (2. * a) };
    if t.is_nan() {
        return FT::INFINITY;
    }
    FT::max(t, 0.)
}

/// Fills the pair matrix of `pool`, one parallel lane per row. Lane `i` only
/// writes row `i`, the diagonal stays infinite.
pub fn solve_pairwise(particles: &[Particle], contact_distance: FT, pool: &mut CandidatePool) {
    let n = particles.len();
    assert_eq!(n, pool.num_particles());

    par_chunks_mut1(&mut pool.pair_times, n, |i, row| {
        let pi = &particles[i];
        for (j, t) in row.iter_mut().enumerate() {
            *t = if i == j {
                FT::INFINITY
            } else {
                pair_contact_time(pi, &particles[j], contact_distance)
            };
        }
    });
}
