//! Wind: a bounded random walk nudging projectiles sideways

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{WIND_LIMIT, WIND_MAX_DELTA};

/// Signed wind strength; positive blows right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wind {
    strength: i32,
}

impl Wind {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self {
            strength: rng.random_range(-WIND_LIMIT..=WIND_LIMIT),
        }
    }

    /// Constant wind, clamped into range
    pub fn fixed(strength: i32) -> Self {
        Self {
            strength: strength.clamp(-WIND_LIMIT, WIND_LIMIT),
        }
    }

    /// Advance one turn
    pub fn tick<R: Rng>(&mut self, rng: &mut R) {
        let delta = rng.random_range(-WIND_MAX_DELTA..=WIND_MAX_DELTA);
        self.strength = (self.strength + delta).clamp(-WIND_LIMIT, WIND_LIMIT);
    }

    pub fn strength(&self) -> i32 {
        self.strength
    }
}
