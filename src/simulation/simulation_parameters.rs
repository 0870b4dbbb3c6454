use crate::{error::SimulationError, floating_type_mod::FT};
use serde::{Deserialize, Serialize};

pub const INIT_WIDTH: FT = 500.;
pub const INIT_HEIGHT: FT = 500.;
pub const INIT_RADIUS: FT = 2.;
pub const INIT_NUM_PARTICLES: usize = 200;
pub const INIT_FALLBACK_STEP: FT = 1.;

fn default_fallback_step() -> Option<FT> {
    Some(INIT_FALLBACK_STEP)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    // domain is [0, width] x [0, height]
    pub width: FT,
    pub height: FT,
    pub radius: FT,
    pub num_particles: usize,

    // size of the rayon pool, `None` uses the rayon default
    #[serde(default)]
    pub num_threads: Option<usize>,

    // ballistic step taken when no finite event exists, `None` turns this into an error
    #[serde(default = "default_fallback_step")]
    pub fallback_step: Option<FT>,

    #[serde(default)]
    pub counters_enabled: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        SimulationParams {
            width: INIT_WIDTH,
            height: INIT_HEIGHT,
            radius: INIT_RADIUS,
            num_particles: INIT_NUM_PARTICLES,
            num_threads: None,
            fallback_step: default_fallback_step(),
            counters_enabled: false,
        }
    }
}

impl SimulationParams {
    pub fn new(width: FT, height: FT, radius: FT, num_particles: usize) -> Self {
        SimulationParams {
            width,
            height,
            radius,
            num_particles,
            ..Default::default()
        }
    }

    pub fn contact_distance(&self) -> FT {
        2. * self.radius
    }

    /// Domain extent along `axis` (0 = x, 1 = y).
    pub fn extent(&self, axis: usize) -> FT {
        match axis {
            0 => self.width,
            1 => self.height,
            _ => unreachable!(),
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.radius.is_finite() || self.radius <= 0. {
            return Err(SimulationError::init(format!(
                "radius must be finite and > 0 (got {})",
                self.radius
            )));
        }
        for (name, dim) in [("width", self.width), ("height", self.height)] {
            if !dim.is_finite() || dim <= self.contact_distance() {
                return Err(SimulationError::init(format!(
                    "{} must be finite and > 2r = {} (got {})",
                    name,
                    self.contact_distance(),
                    dim
                )));
            }
        }
        if self.num_particles < 2 {
            return Err(SimulationError::init(format!(
                "at least 2 particles are required (got {})",
                self.num_particles
            )));
        }
        if self.num_threads == Some(0) {
            return Err(SimulationError::init("num_threads must be > 0"));
        }
        if let Some(dt) = self.fallback_step {
            if !dt.is_finite() || dt <= 0. {
                return Err(SimulationError::init(format!(
                    "fallback_step must be finite and > 0 (got {})",
                    dt
                )));
            }
        }
        Ok(())
    }
}
