//! Tanks Duel - turn-based artillery on destructible terrain
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, ballistics, combat, turns)
//! - `scores`: Per-player score table and final standings
//! - `config`: Level configuration decoding (JSON + layout files)
//! - `input`: Key-to-action mapping for front ends

pub mod config;
pub mod input;
pub mod scores;
pub mod sim;

pub use config::{ColourSpec, ConfigError, GameConfig, Rgb};
pub use scores::ScoreTable;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (30 Hz, one step per frame)
    pub const SIM_DT: f32 = 1.0 / 30.0;

    /// Playfield dimensions (pixels, y grows downward)
    pub const PLAYFIELD_WIDTH: f32 = 864.0;
    pub const PLAYFIELD_HEIGHT: f32 = 640.0;
    /// Width/height of one layout grid cell
    pub const CELL_SIZE: usize = 32;
    /// Heightmap columns (one extra cell past the right edge)
    pub const TERRAIN_COLUMNS: usize = PLAYFIELD_WIDTH as usize + CELL_SIZE;
    /// Deepest value a terrain column may hold (the playfield floor)
    pub const WORLD_HEIGHT: i32 = PLAYFIELD_HEIGHT as i32;

    /// Downward acceleration applied every step (pixels/step²)
    pub const GRAVITY: f32 = 3.6;
    /// Horizontal acceleration per unit of wind strength (pixels/step²)
    pub const WIND_FACTOR: f32 = 0.01;
    /// Wind is bounded to [-WIND_LIMIT, WIND_LIMIT]
    pub const WIND_LIMIT: i32 = 35;
    /// Largest per-turn wind change
    pub const WIND_MAX_DELTA: i32 = 5;

    /// Tank body size; the muzzle sits half of this above the tank
    pub const TANK_SIZE: f32 = 32.0;
    pub const MAX_HEALTH: f32 = 100.0;
    pub const MAX_POWER: f32 = 100.0;
    pub const START_POWER: f32 = 50.0;
    pub const START_FUEL: f32 = 250.0;
    pub const MAX_FUEL: f32 = 450.0;
    pub const START_PARACHUTES: u32 = 3;
    /// Horizontal movement per second of held input
    pub const TANK_MOVE_SPEED: f32 = 80.0;
    /// Turret step per aim input (applied doubled)
    pub const AIM_STEP: f32 = std::f32::consts::PI / 40.0;
    /// Fall speeds (pixels/second)
    pub const FREE_FALL_SPEED: f32 = 120.0;
    pub const PARACHUTE_FALL_SPEED: f32 = 60.0;

    /// Muzzle speed range mapped from power 0..100 (pixels/step)
    pub const MIN_MUZZLE_SPEED: f32 = 1.0;
    pub const MAX_MUZZLE_SPEED: f32 = 60.0;
    /// Blast radii
    pub const SHOT_RADIUS: f32 = 30.0;
    pub const LARGER_SHOT_RADIUS: f32 = 60.0;
    /// Damage dealt at the centre of a blast, falling linearly to 0 at the rim
    pub const MAX_BLAST_DAMAGE: f32 = 60.0;
    /// How long an explosion stays visible (seconds)
    pub const EXPLOSION_DURATION: f32 = 0.2;
}
