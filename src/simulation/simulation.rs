use std::any::Any;
use std::fmt::Display;
use std::mem;
use std::panic::{catch_unwind, AssertUnwindSafe};

use log::{debug, info, warn};
use num_traits::Float;

use crate::{
    advance::advance_particles,
    border::solve_borders,
    candidate_pool::CandidatePool,
    error::SimulationError,
    event::{CollisionType, Event},
    floating_type_mod::FT,
    pairwise::solve_pairwise,
    particle::{total_kinetic_energy, total_momentum, Particle},
    reduction::find_minimum,
    simulation_parameters::SimulationParams,
    statistics::Statistics,
    V2,
};

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub event: Event,
    /// Time between the previous and this event.
    pub dt: FT,
    /// Simulated time after the tick.
    pub time: FT,
    pub step_number: usize,
}

/// Event-driven hard-disc simulation. Every tick resolves exactly one
/// collision: the earliest one among all pairs and walls.
pub struct CollisionSimulation {
    params: SimulationParams,

    // published state and the buffer the next tick is written into
    particles: Vec<Particle>,
    particles_next: Vec<Particle>,

    pool: CandidatePool,

    #[cfg(not(target_arch = "wasm32"))]
    thread_pool: rayon::ThreadPool,

    time: FT,
    step_number: usize,

    statistics: Statistics,
}

impl CollisionSimulation {
    pub fn new(params: SimulationParams, particles: Vec<Particle>) -> Result<Self, SimulationError> {
        params.validate()?;
        validate_initial_state(&params, &particles)?;

        #[cfg(not(target_arch = "wasm32"))]
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(params.num_threads.unwrap_or(0))
            .build()
            .map_err(|e| SimulationError::init(format!("failed to build thread pool: {}", e)))?;

        info!(
            "init {} particles (r={}) in a {}x{} domain",
            particles.len(),
            params.radius,
            params.width,
            params.height
        );

        Ok(CollisionSimulation {
            pool: CandidatePool::new(particles.len()),
            particles_next: particles.clone(),
            particles,
            params,
            #[cfg(not(target_arch = "wasm32"))]
            thread_pool,
            time: 0.,
            step_number: 0,
            statistics: Statistics::new(params.counters_enabled),
        })
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn time(&self) -> FT {
        self.time
    }

    pub fn step_number(&self) -> usize {
        self.step_number
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    pub fn kinetic_energy(&self) -> FT {
        total_kinetic_energy(&self.particles)
    }

    pub fn momentum(&self) -> V2 {
        total_momentum(&self.particles)
    }

    /// Runs one tick. The new particle state is only published if all four
    /// phases succeed.
    pub fn single_step(&mut self) -> Result<StepReport, SimulationError> {
        #[cfg(not(target_arch = "wasm32"))]
        let (dt, event) = self.thread_pool.install(|| {
            run_tick(
                &self.params,
                &self.particles,
                &mut self.particles_next,
                &mut self.pool,
                &mut self.statistics,
            )
        })?;

        #[cfg(target_arch = "wasm32")]
        let (dt, event) = run_tick(
            &self.params,
            &self.particles,
            &mut self.particles_next,
            &mut self.pool,
            &mut self.statistics,
        )?;

        mem::swap(&mut self.particles, &mut self.particles_next);
        self.time += dt;
        self.step_number += 1;

        debug!(
            "step {}: {} {:?}/{:?} after {} (time {})",
            self.step_number,
            event.kind.as_str_lowercase(),
            event.participant,
            event.partner,
            dt,
            self.time
        );

        Ok(StepReport {
            event,
            dt,
            time: self.time,
            step_number: self.step_number,
        })
    }

    /// Runs `num_steps` ticks, stopping at the first failure.
    pub fn run_steps(&mut self, num_steps: usize) -> Result<Option<StepReport>, SimulationError> {
        let mut last = None;
        for _ in 0..num_steps {
            last = Some(self.single_step()?);
        }
        Ok(last)
    }

    /// Ticks until the simulated time reaches `target_time`. Events are
    /// resolved whole, so the final time may lie past the target.
    pub fn advance_to(&mut self, target_time: FT) -> Result<usize, SimulationError> {
        let mut num_steps = 0;
        while self.time < target_time {
            self.single_step()?;
            num_steps += 1;
        }
        Ok(num_steps)
    }
}

/// The four phases of a tick. Every phase returns only after all of its
/// parallel lanes finished, which is the barrier the next phase relies on.
/// Writes go to `particles_next` exclusively.
fn run_tick(
    params: &SimulationParams,
    particles: &[Particle],
    particles_next: &mut [Particle],
    pool: &mut CandidatePool,
    statistics: &mut Statistics,
) -> Result<(FT, Event), SimulationError> {
    statistics.pcounters.begin("simulation-step");

    pool.reset();

    statistics.pcounters.begin("pairwise");
    dispatch("pairwise", || solve_pairwise(particles, params.contact_distance(), pool))?;
    statistics.pcounters.end("pairwise");

    statistics.pcounters.begin("border");
    dispatch("border", || solve_borders(particles, params, pool))?;
    statistics.pcounters.end("border");

    statistics.pcounters.begin("reduce");
    let winner = dispatch("reduce", || find_minimum(pool))?;
    statistics.pcounters.end("reduce");

    let (dt, event) = match winner {
        Some(reduction) => {
            if matches!(reduction.event.kind, CollisionType::None | CollisionType::Ignore) {
                return Err(SimulationError::NumericDegeneracy(format!(
                    "reduction selected a `{}` event",
                    reduction.event.kind.as_str_lowercase()
                )));
            }
            (reduction.time, reduction.event)
        }
        None => match params.fallback_step {
            Some(dt) => {
                warn!("no finite collision time in the candidate pool, advancing by {}", dt);
                statistics.vcounters.add_value("fallback-steps", 1.);
                (dt, Event::none())
            }
            None => {
                return Err(SimulationError::NumericDegeneracy(
                    "no finite collision time in the candidate pool".to_string(),
                ))
            }
        },
    };

    statistics.pcounters.begin("advance");
    dispatch("advance", || advance_particles(particles, particles_next, dt, event, params))??;
    statistics.pcounters.end("advance");

    statistics.pcounters.end("simulation-step");

    statistics.vcounters.add_value("event-time", dt);
    statistics
        .vcounters
        .add_value(&format!("event-{}", event.kind.as_str_lowercase()), 1.);

    Ok((dt, event))
}

/// Runs a phase and turns a panic in any of its lanes into a dispatch fault.
fn dispatch<R>(phase: &'static str, f: impl FnOnce() -> R) -> Result<R, SimulationError> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| SimulationError::Dispatch {
        phase,
        message: panic_message(payload.as_ref()),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Rejects initial states the solver can not handle: wrong particle count,
/// non-finite values, discs outside `[r, dim - r]` and overlapping discs.
pub fn validate_initial_state(params: &SimulationParams, particles: &[Particle]) -> Result<(), SimulationError> {
    if particles.len() != params.num_particles {
        return Err(SimulationError::init(format!(
            "expected {} particles, got {}",
            params.num_particles,
            particles.len()
        )));
    }

    let r = params.radius;
    for (i, p) in particles.iter().enumerate() {
        if !p.is_finite() {
            return Err(SimulationError::init(format!("particle {} is not finite", i)));
        }
        for axis in 0..2 {
            let x = p.position[axis];
            if x < r || x > params.extent(axis) - r {
                return Err(SimulationError::init(format!(
                    "particle {} lies outside the domain at {:?}",
                    i,
                    (p.position.x, p.position.y)
                )));
            }
        }
    }

    let min_sq = params.contact_distance() * params.contact_distance();
    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            if (particles[j].position - particles[i].position).norm_squared() < min_sq {
                return Err(SimulationError::init(format!("particles {} and {} overlap", i, j)));
            }
        }
    }

    Ok(())
}

pub fn is_ft_approx_eq<FT: Float>(a: FT, b: FT, tolerance: FT) -> bool {
    assert!(!a.is_nan());
    assert!(!b.is_nan());
    b <= a + tolerance && b >= a - tolerance
}

pub fn assert_ft_approx_eq<FT: Float + Display>(a: FT, b: FT, tolerance: FT, what: impl FnOnce() -> String) {
    if !is_ft_approx_eq(a, b, tolerance) {
        panic!("{}: {} and {} differ by more than {}", what(), a, b, tolerance);
    }
}
