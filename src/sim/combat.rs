//! Explosion resolution: blast damage, scoring, chained explosions and
//! terrain excavation

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::projectile::Impact;
use super::tank::Tank;
use super::terrain::TerrainField;
use crate::consts::*;
use crate::scores::ScoreTable;

/// A visible explosion. Only the renderer cares about its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplosionEvent {
    pub center: Vec2,
    pub radius: f32,
    /// Player whose shot caused it
    pub player: char,
    /// Set for a destroyed tank's own explosion
    pub secondary: bool,
    pub age: f32,
}

impl ExplosionEvent {
    pub fn new(center: Vec2, radius: f32, player: char, secondary: bool) -> Self {
        Self {
            center,
            radius,
            player,
            secondary,
            age: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.age = (self.age + dt).min(EXPLOSION_DURATION);
    }

    /// Animation progress 0..1
    pub fn progress(&self) -> f32 {
        self.age / EXPLOSION_DURATION
    }

    pub fn is_finished(&self) -> bool {
        self.age >= EXPLOSION_DURATION
    }
}

/// Damage dealt to one tank by a blast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub symbol: char,
    pub damage: f32,
    pub killed: bool,
}

/// Everything a single blast did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlastOutcome {
    pub explosions: Vec<ExplosionEvent>,
    pub hits: Vec<Hit>,
}

/// Linear falloff: full damage at the centre, zero at the rim
pub fn blast_damage(distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 || distance > radius {
        return 0.0;
    }
    MAX_BLAST_DAMAGE * (radius - distance) / radius
}

/// Resolve a blast against the roster in order, then excavate the terrain.
///
/// Tanks are only flagged here; removing them from the roster is the
/// caller's job once resolution is complete. A destroyed tank adds one
/// secondary explosion that deals no further damage.
pub fn explode(
    impact: Impact,
    tanks: &mut [Tank],
    scores: &mut ScoreTable,
    terrain: &mut TerrainField,
) -> BlastOutcome {
    let mut outcome = BlastOutcome::default();
    outcome
        .explosions
        .push(ExplosionEvent::new(impact.pos, impact.radius, impact.owner, false));

    for tank in tanks.iter_mut().filter(|t| t.is_alive()) {
        let distance = impact.pos.distance(tank.position());
        if distance > impact.radius {
            continue;
        }
        let damage = blast_damage(distance, impact.radius);
        tank.receive_damage(damage);
        if tank.symbol != impact.owner {
            scores.credit(impact.owner, damage as i64);
        }

        let killed = tank.health() <= 0.0 && tank.mark_exploded();
        if killed {
            log::info!("Tank {} destroyed by {}", tank.symbol, impact.owner);
            outcome.explosions.push(ExplosionEvent::new(
                tank.position(),
                SHOT_RADIUS,
                impact.owner,
                true,
            ));
        }
        outcome.hits.push(Hit {
            symbol: tank.symbol,
            damage,
            killed,
        });
    }

    terrain.deform(impact.pos.x, impact.radius);
    outcome
}
