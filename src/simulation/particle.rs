use serde::{Deserialize, Serialize};

use crate::{floating_type_mod::FT, V2};

/// A hard disc. All discs share the radius and (unit) mass of the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: V2,
    pub velocity: V2,
}

impl Particle {
    pub fn new(position: V2, velocity: V2) -> Particle {
        Particle { position, velocity }
    }

    pub fn is_finite(&self) -> bool {
        self.position.iter().chain(self.velocity.iter()).all(|x| x.is_finite())
    }

    /// Ballistic position after `dt`.
    #[inline(always)]
    pub fn position_at(&self, dt: FT) -> V2 {
        self.position + self.velocity * dt
    }

    /// Kinetic energy for unit mass.
    pub fn kinetic_energy(&self) -> FT {
        0.5 * self.velocity.norm_squared()
    }
}

pub fn total_kinetic_energy(particles: &[Particle]) -> FT {
    particles.iter().map(Particle::kinetic_energy).sum()
}

pub fn total_momentum(particles: &[Particle]) -> V2 {
    particles.iter().fold(V2::zeros(), |acc, p| acc + p.velocity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec2f;

    #[test]
    fn position_at_is_ballistic() {
        let p = Particle::new(vec2f(1., 2.), vec2f(3., -1.));
        assert_eq!(p.position_at(2.), vec2f(7., 0.));
        assert_eq!(p.position_at(0.), p.position);
    }

    #[test]
    fn diagnostics() {
        let ps = [
            Particle::new(vec2f(0., 0.), vec2f(3., 4.)),
            Particle::new(vec2f(5., 5.), vec2f(-1., 0.)),
        ];
        assert_eq!(total_kinetic_energy(&ps), 12.5 + 0.5);
        assert_eq!(total_momentum(&ps), vec2f(2., 4.));
    }

    #[test]
    fn non_finite_particle_is_detected() {
        let p = Particle::new(vec2f(FT::NAN, 0.), vec2f(0., 0.));
        assert!(!p.is_finite());
        let p = Particle::new(vec2f(0., 0.), vec2f(0., FT::INFINITY));
        assert!(!p.is_finite());
    }
}
