/*!
Event-driven simulation of a hard-disc gas in a rectangular box.

Every tick computes the contact time of all particle pairs and of every
particle with the walls, picks the earliest event with a deterministic
parallel reduction, moves all particles ballistically to that instant and
resolves the collision elastically.
*/

mod platform;
mod simulation;

pub use simulation::*;

#[cfg(not(target_arch = "wasm32"))]
pub use platform::start;
