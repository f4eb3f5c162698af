//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Within one
//! tick, every impact (damage, scoring, chained explosions and terrain
//! excavation) resolves before the roster is compacted and the turn or
//! level moves on.

use super::state::{GamePhase, GameState, Purchase};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Drive direction: negative left, positive right
    pub move_dir: f32,
    /// Aim steps: positive raises the turret
    pub aim: f32,
    /// Power steps: +1 / -1
    pub power: f32,
    /// Shop purchase for the current player
    pub purchase: Option<Purchase>,
    /// Fire and end the turn
    pub fire: bool,
    /// Start a new session (honoured once the game is over)
    pub restart: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase == GamePhase::GameOver {
        if input.restart {
            state.restart();
        }
        return;
    }

    state.begin_tick();

    // Player actions
    if input.move_dir != 0.0 {
        state.move_current(input.move_dir.signum() * TANK_MOVE_SPEED * dt);
    }
    if input.aim != 0.0 {
        state.aim_current(input.aim * AIM_STEP);
    }
    if input.power != 0.0 {
        state.adjust_power_current(input.power);
    }
    if let Some(item) = input.purchase {
        state.purchase(item);
    }
    if input.fire {
        state.fire();
    }

    // Physics and impact resolution
    state.update_tanks(dt);
    state.update_projectiles(dt);

    // Roster compaction, level transition, turn hand-over
    state.finish_tick();
}
