//! Projectile ballistics
//!
//! Explicit Euler at the fixed frame step: velocities are in pixels/step and
//! accelerations in pixels/step², no sub-stepping.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::terrain::TerrainField;
use super::wind::Wind;
use crate::config::Rgb;
use crate::consts::*;

/// Where and how a projectile hit the ground
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Impact {
    pub pos: Vec2,
    pub radius: f32,
    pub owner: char,
}

/// A shell in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub owner: char,
    /// Blast radius on impact
    pub radius: f32,
    /// Cosmetic only
    pub colour: Rgb,
    collided: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, owner: char, radius: f32, colour: Rgb) -> Self {
        Self {
            pos,
            vel,
            owner,
            radius,
            colour,
            collided: false,
        }
    }

    /// Launch from a muzzle at `angle` (radians, screen-up positive) with
    /// `power` in 0..100 mapped onto the muzzle speed range
    pub fn launch(muzzle: Vec2, angle: f32, power: f32, owner: char, radius: f32, colour: Rgb) -> Self {
        let t = power.clamp(0.0, MAX_POWER) / MAX_POWER;
        let speed = MIN_MUZZLE_SPEED + t * (MAX_MUZZLE_SPEED - MIN_MUZZLE_SPEED);
        let vel = Vec2::new(speed * angle.cos(), -speed * angle.sin());
        Self::new(muzzle, vel, owner, radius, colour)
    }

    /// Larger shots are drawn bigger
    pub fn is_larger(&self) -> bool {
        self.radius > SHOT_RADIUS
    }

    /// Advance one step. Returns the impact if this step hit the terrain;
    /// a projectile collides at most once.
    pub fn step(&mut self, terrain: &TerrainField, wind: &Wind) -> Option<Impact> {
        if self.collided {
            return None;
        }
        self.pos += self.vel;
        self.vel.y += GRAVITY;

        let ground = terrain.height_at(self.pos.x) as f32;
        if self.pos.y < ground {
            self.vel.x += wind.strength() as f32 * WIND_FACTOR;
        }

        if self.pos.y >= ground {
            self.collided = true;
            return Some(Impact {
                pos: self.pos,
                radius: self.radius,
                owner: self.owner,
            });
        }
        None
    }

    /// Off the sides or below the bottom; leaving through the top is allowed
    pub fn is_offscreen(&self) -> bool {
        self.pos.x < 0.0 || self.pos.x > PLAYFIELD_WIDTH || self.pos.y > PLAYFIELD_HEIGHT
    }

    pub fn should_remove(&self) -> bool {
        self.collided || self.is_offscreen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calm() -> Wind {
        Wind::fixed(0)
    }

    #[test]
    fn test_launch_speed_mapping() {
        let p = Projectile::launch(Vec2::ZERO, 0.0, 100.0, 'A', SHOT_RADIUS, Rgb::WHITE);
        assert!((p.vel.x - 60.0).abs() < 1e-4);
        let p = Projectile::launch(Vec2::ZERO, std::f32::consts::FRAC_PI_2, 0.0, 'A', SHOT_RADIUS, Rgb::WHITE);
        assert!((p.vel.y + 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_gravity_integration() {
        let terrain = TerrainField::flat(900, 640, 600);
        let mut p = Projectile::new(Vec2::new(100.0, 100.0), Vec2::new(2.0, -10.0), 'A', 30.0, Rgb::WHITE);
        assert!(p.step(&terrain, &calm()).is_none());
        assert_eq!(p.pos, Vec2::new(102.0, 90.0));
        assert!((p.vel.y - (-10.0 + GRAVITY)).abs() < 1e-6);
        assert_eq!(p.vel.x, 2.0);
    }

    #[test]
    fn test_wind_pushes_in_open_air() {
        let terrain = TerrainField::flat(900, 640, 600);
        let wind = Wind::fixed(-20);
        let mut p = Projectile::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 'A', 30.0, Rgb::WHITE);
        p.step(&terrain, &wind);
        assert!((p.vel.x + 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_collision_reports_once() {
        let terrain = TerrainField::flat(900, 640, 300);
        let mut p = Projectile::new(Vec2::new(100.0, 295.0), Vec2::new(0.0, 10.0), 'B', 30.0, Rgb::WHITE);
        let impact = p.step(&terrain, &calm()).expect("should hit");
        assert_eq!(impact.owner, 'B');
        assert_eq!(impact.pos, Vec2::new(100.0, 305.0));
        assert!(p.should_remove());
        assert!(p.step(&terrain, &calm()).is_none());
    }

    #[test]
    fn test_offscreen_removal() {
        let terrain = TerrainField::flat(900, 640, 600);
        let mut p = Projectile::new(Vec2::new(860.0, 100.0), Vec2::new(10.0, 0.0), 'A', 30.0, Rgb::WHITE);
        assert!(p.step(&terrain, &calm()).is_none());
        assert!(p.should_remove());

        let above = Projectile::new(Vec2::new(100.0, -50.0), Vec2::ZERO, 'A', 30.0, Rgb::WHITE);
        assert!(!above.should_remove());
    }
}
