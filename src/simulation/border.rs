use crate::{
    candidate_pool::CandidatePool, concurrency::par_iter_mut2, event::CollisionType, floating_type_mod::FT,
    particle::Particle, simulation_parameters::SimulationParams,
};

/// Time until a disc at coordinate `p` moving with `v` touches the wall it is
/// heading for on an axis spanning `[0, extent]`.
///
/// A disc that drifted a rounding error past the contact plane while moving
/// outward yields 0 instead of a negative time.
#[inline(always)]
pub fn axis_wall_time(p: FT, v: FT, extent: FT, radius: FT) -> FT {
    let t = if v > 0. {
        (extent - radius - p) / v
    } else if v < 0. {
        (radius - p) / v
    } else {
        return FT::INFINITY;
    };
    FT::max(t, 0.)
}

/// Earliest wall contact of one particle over both axes. Ties go to x.
pub fn border_contact_time(particle: &Particle, params: &SimulationParams) -> (FT, CollisionType) {
    let tx = axis_wall_time(particle.position.x, particle.velocity.x, params.width, params.radius);
    let ty = axis_wall_time(particle.position.y, particle.velocity.y, params.height, params.radius);
    if tx <= ty {
        (tx, CollisionType::ParticleWallX)
    } else {
        (ty, CollisionType::ParticleWallY)
    }
}

/// Fills the wall entries of `pool`, one parallel lane per particle.
pub fn solve_borders(particles: &[Particle], params: &SimulationParams, pool: &mut CandidatePool) {
    assert_eq!(particles.len(), pool.num_particles());

    par_iter_mut2(&mut pool.wall_times, &mut pool.wall_kinds, |i, t, kind| {
        let (time, axis) = border_contact_time(&particles[i], params);
        *t = time;
        *kind = axis;
    });
}
