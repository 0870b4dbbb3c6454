use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionType {
    None,
    Ignore,
    ParticleParticle,
    ParticleWallX,
    ParticleWallY,
}

impl CollisionType {
    pub fn as_str_lowercase(&self) -> &'static str {
        match self {
            CollisionType::None => "none",
            CollisionType::Ignore => "ignore",
            CollisionType::ParticleParticle => "particle-particle",
            CollisionType::ParticleWallX => "particle-wall-x",
            CollisionType::ParticleWallY => "particle-wall-y",
        }
    }

    pub fn is_wall(&self) -> bool {
        matches!(self, CollisionType::ParticleWallX | CollisionType::ParticleWallY)
    }
}

/// Descriptor of the next velocity discontinuity. Lives for a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub kind: CollisionType,
    pub participant: usize,
    pub partner: Option<usize>,
}

impl Event {
    pub fn none() -> Event {
        Event {
            kind: CollisionType::None,
            participant: 0,
            partner: None,
        }
    }

    /// Pair event, participants stored in ascending order.
    pub fn pair(i: usize, j: usize) -> Event {
        Event {
            kind: CollisionType::ParticleParticle,
            participant: i.min(j),
            partner: Some(i.max(j)),
        }
    }

    pub fn wall(i: usize, kind: CollisionType) -> Event {
        debug_assert!(kind.is_wall());
        Event {
            kind,
            participant: i,
            partner: None,
        }
    }
}
