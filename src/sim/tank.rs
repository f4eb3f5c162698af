//! Tank physical state: movement, aim, power, health and falling

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::terrain::TerrainField;
use crate::config::Rgb;
use crate::consts::*;

/// Physical state of a tank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TankPhase {
    /// Resting on the terrain surface
    Grounded,
    /// Falling without a parachute
    Airborne,
    /// Falling slowly under a deployed parachute
    Parachuting,
    /// Marked for removal from the roster
    Destroyed,
}

/// Why a tank left the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DestroyCause {
    Killed,
    FellOffPlayfield,
    FellWithoutParachute,
}

/// Notable transitions reported by [`Tank::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TankEvent {
    ParachuteDeployed,
    Landed { parachutes_left: u32 },
    Destroyed(DestroyCause),
}

/// A player's tank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tank {
    pub symbol: char,
    pub colour: Rgb,
    pub x: f32,
    /// Screen-space y of the tank's base (grows downward)
    pub y: f32,
    pub phase: TankPhase,
    health: f32,
    power: f32,
    fuel: f32,
    parachutes: u32,
    /// Turret angle in radians, 0 = right, π/2 = straight up
    turret_angle: f32,
    larger_shot_ready: bool,
    /// Set once the tank's own death explosion has been registered
    exploded: bool,
}

impl Tank {
    /// Create a tank seated on the terrain at `x`
    pub fn new(symbol: char, x: f32, colour: Rgb, terrain: &TerrainField) -> Self {
        Self {
            symbol,
            colour,
            x,
            y: terrain.height_at(x) as f32,
            phase: TankPhase::Grounded,
            health: MAX_HEALTH,
            power: START_POWER,
            fuel: START_FUEL,
            parachutes: START_PARACHUTES,
            turret_angle: std::f32::consts::FRAC_PI_2,
            larger_shot_ready: false,
            exploded: false,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Where projectiles leave the barrel
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.x, self.y - TANK_SIZE / 2.0)
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn power(&self) -> f32 {
        self.power
    }

    pub fn fuel(&self) -> f32 {
        self.fuel
    }

    pub fn parachutes(&self) -> u32 {
        self.parachutes
    }

    pub fn turret_angle(&self) -> f32 {
        self.turret_angle
    }

    pub fn larger_shot_ready(&self) -> bool {
        self.larger_shot_ready
    }

    pub fn is_alive(&self) -> bool {
        self.phase != TankPhase::Destroyed
    }

    pub fn has_exploded(&self) -> bool {
        self.exploded
    }

    /// Drive horizontally. Only legal while grounded; needs `|dx|` fuel and
    /// must stay on the playfield. Returns whether the tank moved.
    pub fn move_by(&mut self, dx: f32, terrain: &TerrainField) -> bool {
        if self.phase != TankPhase::Grounded || !dx.is_finite() {
            return false;
        }
        let distance = dx.abs();
        let new_x = self.x + dx;
        if distance > self.fuel || !(0.0..=PLAYFIELD_WIDTH).contains(&new_x) {
            return false;
        }
        self.x = new_x;
        self.y = terrain.height_at(self.x) as f32;
        self.fuel -= distance;
        true
    }

    /// Rotate the turret; the input step is applied doubled
    pub fn adjust_turret(&mut self, delta: f32) {
        self.turret_angle = (self.turret_angle + 2.0 * delta).clamp(0.0, std::f32::consts::PI);
    }

    /// Power never exceeds current health
    pub fn adjust_power(&mut self, step: f32) {
        let cap = MAX_POWER.min(self.health);
        self.power = (self.power + step).clamp(0.0, cap);
    }

    pub fn add_fuel(&mut self, amount: f32) {
        self.fuel = (self.fuel + amount).min(MAX_FUEL);
    }

    pub fn repair(&mut self, amount: f32) {
        self.health = (self.health + amount).min(MAX_HEALTH);
    }

    pub fn add_parachute(&mut self) {
        self.parachutes += 1;
    }

    pub fn arm_larger_shot(&mut self) {
        self.larger_shot_ready = true;
    }

    /// Consume the larger-shot upgrade, returning the blast radius to fire
    pub fn take_shot_radius(&mut self) -> f32 {
        if std::mem::take(&mut self.larger_shot_ready) {
            LARGER_SHOT_RADIUS
        } else {
            SHOT_RADIUS
        }
    }

    pub fn receive_damage(&mut self, amount: f32) {
        self.health = (self.health - amount.max(0.0)).max(0.0);
        self.power = self.power.min(self.health);
    }

    /// Flag the tank's death explosion as registered and mark it for removal.
    /// Returns false if it had already exploded.
    pub fn mark_exploded(&mut self) -> bool {
        if self.exploded {
            return false;
        }
        self.exploded = true;
        self.phase = TankPhase::Destroyed;
        true
    }

    /// Advance falling physics by `dt` seconds.
    ///
    /// A parachute deploys automatically whenever the ground drops away and
    /// one is available. The charge is spent on landing, not on deployment.
    pub fn update(&mut self, dt: f32, terrain: &TerrainField) -> Option<TankEvent> {
        if self.phase == TankPhase::Destroyed {
            return None;
        }
        let ground = terrain.height_at(self.x) as f32;
        let mut event = None;

        if self.y < ground {
            if self.phase != TankPhase::Parachuting {
                if self.parachutes > 0 {
                    self.phase = TankPhase::Parachuting;
                    event = Some(TankEvent::ParachuteDeployed);
                } else {
                    self.phase = TankPhase::Airborne;
                }
            }

            let speed = if self.phase == TankPhase::Parachuting {
                PARACHUTE_FALL_SPEED
            } else {
                FREE_FALL_SPEED
            };
            self.y += speed * dt;

            if self.phase == TankPhase::Airborne && self.parachutes == 0 {
                self.phase = TankPhase::Destroyed;
                return Some(TankEvent::Destroyed(DestroyCause::FellWithoutParachute));
            }

            if self.y >= ground {
                event = Some(self.land(ground));
            }
        } else {
            // Already on (or pressed into) the surface
            if self.phase == TankPhase::Parachuting {
                event = Some(self.land(ground));
            } else {
                self.y = ground;
                self.phase = TankPhase::Grounded;
            }
        }

        if self.y >= PLAYFIELD_HEIGHT {
            self.phase = TankPhase::Destroyed;
            return Some(TankEvent::Destroyed(DestroyCause::FellOffPlayfield));
        }
        event
    }

    fn land(&mut self, ground: f32) -> TankEvent {
        self.y = ground;
        if self.phase == TankPhase::Parachuting {
            self.parachutes = self.parachutes.saturating_sub(1);
        }
        self.phase = TankPhase::Grounded;
        TankEvent::Landed {
            parachutes_left: self.parachutes,
        }
    }
}
