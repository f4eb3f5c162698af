//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (roster sorted by player symbol)
//! - No rendering or platform dependencies

pub mod combat;
pub mod level;
pub mod projectile;
pub mod state;
pub mod tank;
pub mod terrain;
pub mod tick;
pub mod wind;

pub use combat::{ExplosionEvent, explode};
pub use level::{LevelDescriptor, LevelManager, LevelProvider};
pub use projectile::{Impact, Projectile};
pub use state::{GameEvent, GamePhase, GameState, Purchase, ShopPrices};
pub use tank::{DestroyCause, Tank, TankEvent, TankPhase};
pub use terrain::{LayoutGrid, Marker, TerrainField, TreeAnchor};
pub use tick::{TickInput, tick};
pub use wind::Wind;
