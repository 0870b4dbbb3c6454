use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    error::SimulationError, floating_type_mod::FT, particle::Particle, simulation::CollisionSimulation,
    simulation_parameters::SimulationParams, vec2f,
};

pub const INIT_SEED: u64 = 22;
pub const INIT_SPEED: FT = 20.;

/// Rejection sampling gives up after this many draws per particle.
const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

fn default_seed() -> u64 {
    INIT_SEED
}

fn default_speed() -> FT {
    INIT_SPEED
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Magnitude of every initial velocity.
    #[serde(default = "default_speed")]
    pub speed: FT,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            seed: INIT_SEED,
            speed: INIT_SPEED,
        }
    }
}

/// Contents of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub simulation: SimulationParams,
    #[serde(default)]
    pub scene: SceneConfig,
}

/// Random non-overlapping discs inside `[r, dim - r]`. Velocity components
/// are drawn from `[0.1, 10.1)` and the vector is scaled to `scene.speed`.
/// The same seed always yields the same particles.
pub fn generate_particles(params: &SimulationParams, scene: &SceneConfig) -> Result<Vec<Particle>, SimulationError> {
    params.validate()?;
    if !scene.speed.is_finite() || scene.speed < 0. {
        return Err(SimulationError::init(format!(
            "speed must be finite and non-negative, got {}",
            scene.speed
        )));
    }

    let r = params.radius;
    let min_sq = params.contact_distance() * params.contact_distance();
    let mut rng = StdRng::seed_from_u64(scene.seed);
    let mut particles: Vec<Particle> = Vec::with_capacity(params.num_particles);

    for i in 0..params.num_particles {
        let mut attempts = 0;
        let position = loop {
            if attempts == MAX_PLACEMENT_ATTEMPTS {
                return Err(SimulationError::init(format!(
                    "could not place particle {} without overlap after {} attempts",
                    i, MAX_PLACEMENT_ATTEMPTS
                )));
            }
            attempts += 1;

            let candidate = vec2f(
                rng.gen_range(r..=params.width - r),
                rng.gen_range(r..=params.height - r),
            );
            if particles
                .iter()
                .all(|p| (p.position - candidate).norm_squared() >= min_sq)
            {
                break candidate;
            }
        };

        let direction = vec2f(rng.gen_range(0.1..10.1), rng.gen_range(0.1..10.1));
        let velocity = direction * (scene.speed / direction.norm());

        particles.push(Particle::new(position, velocity));
    }

    Ok(particles)
}

pub fn init_collision_sim(config: &SimulationConfig) -> Result<CollisionSimulation, SimulationError> {
    let particles = generate_particles(&config.simulation, &config.scene)?;
    CollisionSimulation::new(config.simulation, particles)
}
