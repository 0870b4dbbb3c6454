
pub mod advance;
pub mod border;
pub mod candidate_pool;
pub mod concurrency;
pub mod error;
pub mod event;
pub mod pairwise;
pub mod particle;
pub mod reduction;
pub mod scene;
pub mod simulation_parameters;
pub mod statistics;
pub mod simulation;

#[cfg(feature = "double-precision")]
pub mod floating_type_mod {
    pub type FT = f64;
}

#[cfg(not(feature = "double-precision"))]
pub mod floating_type_mod {
    pub type FT = f32;
}

use floating_type_mod::FT;

use nalgebra::SVector;

pub type V<FT, const D: usize> = SVector<FT, D>;

pub type V2 = V<FT, 2>;

pub fn vec2f(x: FT, y: FT) -> V<FT, 2> {
    [x, y].into()
}

pub use error::SimulationError;
pub use event::{CollisionType, Event};
pub use particle::Particle;
pub use scene::{generate_particles, init_collision_sim, SceneConfig, SimulationConfig};
pub use simulation::*;
pub use simulation_parameters::SimulationParams;
