use hard_disc_gas::{
    assert_ft_approx_eq, floating_type_mod::FT, generate_particles, init_collision_sim, is_ft_approx_eq, vec2f,
    CollisionSimulation, CollisionType, Event, Particle, SceneConfig, SimulationConfig, SimulationError,
    SimulationParams,
};
use proptest::prelude::*;

fn small_gas(num_threads: Option<usize>) -> CollisionSimulation {
    let config = SimulationConfig {
        simulation: SimulationParams {
            num_threads,
            ..SimulationParams::new(100., 100., 2., 40)
        },
        scene: SceneConfig { seed: 5, speed: 20. },
    };
    init_collision_sim(&config).unwrap()
}

fn assert_inside(sim: &CollisionSimulation, tolerance: FT) {
    let params = sim.params();
    for (i, p) in sim.particles().iter().enumerate() {
        for axis in 0..2 {
            let x = p.position[axis];
            assert!(
                x >= params.radius - tolerance && x <= params.extent(axis) - params.radius + tolerance,
                "particle {} left the domain at step {}: {:?}",
                i,
                sim.step_number(),
                p.position
            );
        }
    }
}

#[test]
fn head_on_pair() {
    let params = SimulationParams::new(100., 100., 1., 2);
    let particles = vec![
        Particle::new(vec2f(20., 50.), vec2f(1., 0.)),
        Particle::new(vec2f(30., 50.), vec2f(-1., 0.)),
    ];
    let mut sim = CollisionSimulation::new(params, particles).unwrap();

    let report = sim.single_step().unwrap();
    assert_eq!(report.dt, 4.);
    assert_eq!(report.event, Event::pair(0, 1));
    assert_eq!(sim.particles()[0], Particle::new(vec2f(24., 50.), vec2f(-1., 0.)));
    assert_eq!(sim.particles()[1], Particle::new(vec2f(26., 50.), vec2f(1., 0.)));
}

#[test]
fn touching_wall_resolves_at_zero_time_without_moving() {
    let params = SimulationParams::new(100., 100., 1., 2);
    let particles = vec![
        Particle::new(vec2f(1., 30.), vec2f(-5., 0.)),
        Particle::new(vec2f(60., 60.), vec2f(0., 1.)),
    ];
    let mut sim = CollisionSimulation::new(params, particles.clone()).unwrap();

    let report = sim.single_step().unwrap();
    assert_eq!(report.dt, 0.);
    assert_eq!(report.event, Event::wall(0, CollisionType::ParticleWallX));
    assert_eq!(sim.time(), 0.);

    // zero-time tick: only the velocity of the participant changes
    assert_eq!(sim.particles()[0], Particle::new(vec2f(1., 30.), vec2f(5., 0.)));
    assert_eq!(sim.particles()[1], particles[1]);

    // the resolved contact is not selected again, next is the opposite wall
    let report = sim.single_step().unwrap();
    assert!(report.dt > 19. && report.dt < 20.);
    assert_eq!(report.event, Event::wall(0, CollisionType::ParticleWallX));
    assert_ft_approx_eq(sim.particles()[0].position.x, 99., 1e-3, || "x after wall flight".to_string());
    assert_eq!(sim.particles()[0].velocity, vec2f(-5., 0.));
}

#[test]
fn identical_runs_are_bit_identical() {
    let mut a = small_gas(None);
    let mut b = small_gas(None);
    for _ in 0..300 {
        let ra = a.single_step().unwrap();
        let rb = b.single_step().unwrap();
        assert_eq!(ra, rb);
    }
    assert_eq!(a.particles(), b.particles());
}

#[test]
fn split_runs_equal_one_long_run() {
    let mut split = small_gas(None);
    split.run_steps(150).unwrap();
    split.run_steps(150).unwrap();

    let mut long = small_gas(None);
    long.run_steps(300).unwrap();

    assert_eq!(split.particles(), long.particles());
    assert_eq!(split.time(), long.time());
}

#[test]
fn result_does_not_depend_on_thread_count() {
    let mut reference = small_gas(Some(1));
    reference.run_steps(300).unwrap();

    for threads in [2, 3, 8] {
        let mut sim = small_gas(Some(threads));
        sim.run_steps(300).unwrap();
        assert_eq!(sim.particles(), reference.particles(), "{} threads", threads);
        assert_eq!(sim.time(), reference.time());
    }
}

#[test]
fn energy_and_bounds_are_kept() {
    let mut sim = small_gas(None);
    let initial_energy = sim.kinetic_energy();

    for _ in 0..1000 {
        sim.single_step().unwrap();
        assert_inside(&sim, 1e-3);
    }

    assert_ft_approx_eq(initial_energy, sim.kinetic_energy(), initial_energy * 1e-3, || {
        format!("kinetic energy after {} ticks", sim.step_number())
    });
}

#[test]
fn discs_do_not_interpenetrate() {
    let mut sim = small_gas(None);
    let min_distance = sim.params().contact_distance() - 1e-2;
    for _ in 0..500 {
        sim.single_step().unwrap();
        let ps = sim.particles();
        for i in 0..ps.len() {
            for j in (i + 1)..ps.len() {
                let d = (ps[j].position - ps[i].position).norm();
                assert!(d >= min_distance, "{} and {} overlap by {}", i, j, min_distance - d);
            }
        }
    }
}

#[test]
fn advance_to_reaches_the_target_time() {
    let mut sim = small_gas(None);
    let ticks = sim.advance_to(10.).unwrap();
    assert_eq!(ticks, sim.step_number());
    assert!(sim.time() >= 10.);
}

#[test]
fn overlapping_initial_state_is_rejected() {
    let params = SimulationParams::new(100., 100., 2., 2);
    let particles = vec![
        Particle::new(vec2f(50., 50.), vec2f(1., 0.)),
        Particle::new(vec2f(53., 50.), vec2f(-1., 0.)),
    ];
    match CollisionSimulation::new(params, particles) {
        Err(SimulationError::Initialization(message)) => assert!(message.contains("overlap")),
        other => panic!("expected initialization fault, got {:?}", other.err()),
    }
}

#[test]
fn strict_mode_fails_for_resting_gas() {
    let params = SimulationParams {
        fallback_step: None,
        ..SimulationParams::new(100., 100., 1., 3)
    };
    let particles = generate_particles(&params, &SceneConfig { seed: 1, speed: 0. }).unwrap();
    let mut sim = CollisionSimulation::new(params, particles).unwrap();
    assert!(matches!(sim.single_step(), Err(SimulationError::NumericDegeneracy(_))));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn random_scenes_stay_valid(seed in any::<u64>(), speed in 0.5f32..50., num_particles in 2usize..12) {
        let config = SimulationConfig {
            simulation: SimulationParams::new(60., 40., 1.5, num_particles),
            scene: SceneConfig { seed, speed: speed as FT },
        };
        let mut sim = init_collision_sim(&config).unwrap();
        let initial_energy = sim.kinetic_energy();

        for _ in 0..200 {
            let report = sim.single_step().unwrap();
            prop_assert!(report.dt >= 0.);
            prop_assert!(report.event.kind != CollisionType::None);
            assert_inside(&sim, 1e-3);
        }

        prop_assert!(is_ft_approx_eq(initial_energy, sim.kinetic_energy(), initial_energy * 1e-3));
    }
}
