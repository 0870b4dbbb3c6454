use crate::{
    concurrency::par_iter_mut1,
    error::SimulationError,
    event::{CollisionType, Event},
    floating_type_mod::FT,
    particle::Particle,
    simulation_parameters::SimulationParams,
    V2,
};

/// Equal-mass elastic collision: the velocity components along the line of
/// centres are exchanged, the tangential components are kept.
///
/// Returns `None` if the centres coincide and no normal exists.
pub fn resolve_pair(pi: &Particle, pj: &Particle) -> Option<(V2, V2)> {
    let normal = (pj.position - pi.position).try_normalize(0.)?;

    let vi_n = pi.velocity.dot(&normal);
    let vj_n = pj.velocity.dot(&normal);

    Some((
        pi.velocity + normal * (vj_n - vi_n),
        pj.velocity + normal * (vi_n - vj_n),
    ))
}

/// Specular reflection on a wall of `axis`. The coordinate is clamped to
/// `[r, extent - r]` so rounding can not leave a disc outside the domain.
pub fn resolve_wall(particle: &mut Particle, axis: usize, extent: FT, radius: FT) {
    particle.velocity[axis] = -particle.velocity[axis];
    particle.position[axis] = particle.position[axis].max(radius).min(extent - radius);
}

/// Moves every particle of `input` ballistically by `dt` into `output`, then
/// applies the velocity change `event` calls for.
///
/// `None`/`Ignore` events change no velocity.
pub fn advance_particles(
    input: &[Particle],
    output: &mut [Particle],
    dt: FT,
    event: Event,
    params: &SimulationParams,
) -> Result<(), SimulationError> {
    assert_eq!(input.len(), output.len());
    let n = input.len();

    par_iter_mut1(output, |i, out| {
        let p = &input[i];
        *out = Particle::new(p.position_at(dt), p.velocity);
    });

    let check_index = |idx: usize| {
        if idx < n {
            Ok(idx)
        } else {
            Err(SimulationError::Dispatch {
                phase: "advance",
                message: format!("event references particle {} of {}", idx, n),
            })
        }
    };

    match event.kind {
        CollisionType::ParticleParticle => {
            let i = check_index(event.participant)?;
            let j = check_index(event.partner.ok_or_else(|| SimulationError::Dispatch {
                phase: "advance",
                message: "pair event without partner".to_string(),
            })?)?;
            if i == j {
                return Err(SimulationError::Dispatch {
                    phase: "advance",
                    message: format!("pair event with identical participants {}", i),
                });
            }

            let (vi, vj) = resolve_pair(&output[i], &output[j]).ok_or_else(|| {
                SimulationError::NumericDegeneracy(format!(
                    "particles {} and {} have coincident centres at contact",
                    i, j
                ))
            })?;
            output[i].velocity = vi;
            output[j].velocity = vj;
        }
        CollisionType::ParticleWallX => {
            let i = check_index(event.participant)?;
            resolve_wall(&mut output[i], 0, params.width, params.radius);
        }
        CollisionType::ParticleWallY => {
            let i = check_index(event.participant)?;
            resolve_wall(&mut output[i], 1, params.height, params.radius);
        }
        CollisionType::None | CollisionType::Ignore => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{particle::total_kinetic_energy, particle::total_momentum, vec2f};

    fn params() -> SimulationParams {
        SimulationParams::new(100., 100., 1., 3)
    }

    #[test]
    fn head_on_exchange() {
        let input = vec![
            Particle::new(vec2f(0., 0.), vec2f(1., 0.)),
            Particle::new(vec2f(10., 0.), vec2f(-1., 0.)),
        ];
        let mut output = input.clone();
        advance_particles(&input, &mut output, 4., Event::pair(0, 1), &params()).unwrap();

        assert_eq!(output[0].position, vec2f(4., 0.));
        assert_eq!(output[1].position, vec2f(6., 0.));
        assert_eq!(output[0].velocity, vec2f(-1., 0.));
        assert_eq!(output[1].velocity, vec2f(1., 0.));
    }

    #[test]
    fn oblique_exchange_keeps_tangential_components() {
        // line of centres along y at contact
        let pi = Particle::new(vec2f(5., 5.), vec2f(3., 2.));
        let pj = Particle::new(vec2f(5., 7.), vec2f(-1., -4.));
        let (vi, vj) = resolve_pair(&pi, &pj).unwrap();
        assert_eq!(vi, vec2f(3., -4.));
        assert_eq!(vj, vec2f(-1., 2.));
    }

    #[test]
    fn pair_collision_conserves_energy_and_momentum() {
        let pi = Particle::new(vec2f(0., 0.), vec2f(2., 0.5));
        let pj = Particle::new(vec2f(1.2, 1.6), vec2f(-1., -0.25));
        let (vi, vj) = resolve_pair(&pi, &pj).unwrap();
        let before = [pi, pj];
        let after = [Particle::new(pi.position, vi), Particle::new(pj.position, vj)];

        let de = (total_kinetic_energy(&before) - total_kinetic_energy(&after)).abs();
        let dm = (total_momentum(&before) - total_momentum(&after)).norm();
        assert!(de < 1e-5, "energy changed by {}", de);
        assert!(dm < 1e-5, "momentum changed by {}", dm);
    }

    #[test]
    fn coincident_centres_are_degenerate() {
        let input = vec![
            Particle::new(vec2f(5., 5.), vec2f(1., 0.)),
            Particle::new(vec2f(5., 5.), vec2f(-1., 0.)),
        ];
        let mut output = input.clone();
        let err = advance_particles(&input, &mut output, 0., Event::pair(0, 1), &params()).unwrap_err();
        assert!(matches!(err, SimulationError::NumericDegeneracy(_)));
    }

    #[test]
    fn wall_flip_at_zero_time() {
        let input = vec![
            Particle::new(vec2f(1., 30.), vec2f(-5., 2.)),
            Particle::new(vec2f(50., 50.), vec2f(3., 3.)),
        ];
        let mut output = input.clone();
        advance_particles(
            &input,
            &mut output,
            0.,
            Event::wall(0, CollisionType::ParticleWallX),
            &params(),
        )
        .unwrap();

        assert_eq!(output[0].position, input[0].position);
        assert_eq!(output[1].position, input[1].position);
        assert_eq!(output[0].velocity, vec2f(5., 2.));
        assert_eq!(output[1].velocity, input[1].velocity);
    }

    #[test]
    fn wall_resolution_clamps_into_domain() {
        let mut particle = Particle::new(vec2f(40., 99.2), vec2f(0., 1.));
        resolve_wall(&mut particle, 1, 100., 1.);
        assert_eq!(particle.position, vec2f(40., 99.));
        assert_eq!(particle.velocity, vec2f(0., -1.));
    }

    #[test]
    fn all_particles_advance_uniformly() {
        let input = vec![
            Particle::new(vec2f(10., 10.), vec2f(1., 2.)),
            Particle::new(vec2f(20., 20.), vec2f(0., 0.)),
            Particle::new(vec2f(30., 30.), vec2f(-2., 1.)),
        ];
        let mut output = input.clone();
        advance_particles(
            &input,
            &mut output,
            2.,
            Event::wall(1, CollisionType::ParticleWallY),
            &params(),
        )
        .unwrap();
        assert_eq!(output[0].position, vec2f(12., 14.));
        assert_eq!(output[1].position, vec2f(20., 20.));
        assert_eq!(output[2].position, vec2f(26., 32.));
        assert_eq!(output[0].velocity, input[0].velocity);
        assert_eq!(output[2].velocity, input[2].velocity);
    }

    #[test]
    fn none_event_only_moves() {
        let input = vec![
            Particle::new(vec2f(10., 10.), vec2f(1., 0.)),
            Particle::new(vec2f(20., 20.), vec2f(0., -1.)),
        ];
        let mut output = input.clone();
        advance_particles(&input, &mut output, 1., Event::none(), &params()).unwrap();
        assert_eq!(output[0], Particle::new(vec2f(11., 10.), vec2f(1., 0.)));
        assert_eq!(output[1], Particle::new(vec2f(20., 19.), vec2f(0., -1.)));
    }

    #[test]
    fn out_of_range_event_is_a_dispatch_fault() {
        let input = vec![
            Particle::new(vec2f(10., 10.), vec2f(1., 0.)),
            Particle::new(vec2f(20., 20.), vec2f(0., -1.)),
        ];
        let mut output = input.clone();
        let err = advance_particles(&input, &mut output, 0., Event::pair(0, 5), &params()).unwrap_err();
        assert!(matches!(err, SimulationError::Dispatch { phase: "advance", .. }));
    }
}
