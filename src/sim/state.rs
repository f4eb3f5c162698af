//! Session state and player actions
//!
//! One `GameState` owns everything that changes during play: terrain, wind,
//! roster, projectiles, scores and the level cursor. It is advanced by a
//! single caller through [`super::tick::tick`] and the action methods below.

use std::collections::{BTreeMap, BTreeSet};

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::combat::{self, ExplosionEvent};
use super::level::{LevelDescriptor, LevelManager, LevelProvider};
use super::projectile::{Impact, Projectile};
use super::tank::{DestroyCause, Tank, TankEvent};
use super::terrain::TerrainField;
use super::wind::Wind;
use crate::config::{ColourSpec, Rgb};
use crate::consts::*;
use crate::scores::ScoreTable;

/// Turn / level state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for `current_player` to act
    AwaitingAction,
    /// Roster down to one tank; the next level is being loaded
    LevelTransition,
    /// No levels left; simulation frozen, scores kept for display
    GameOver,
}

/// Things that happened during the last tick, for renderers and logs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { level: usize },
    TurnChanged { player: char, wind: i32 },
    ShotFired { player: char, radius: f32 },
    Purchased { player: char, item: Purchase },
    TankDamaged { symbol: char, damage: f32, by: char },
    TankDestroyed { symbol: char, cause: DestroyCause },
    ParachuteDeployed { symbol: char },
    TankLanded { symbol: char, parachutes_left: u32 },
    GameOver { winner: Option<char> },
}

/// Upgrades bought with score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Purchase {
    Fuel,
    Parachute,
    Repair,
    LargerShot,
}

/// Shop prices. Each price is also the minimum score needed to buy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopPrices {
    pub fuel: i64,
    pub fuel_amount: f32,
    pub parachute: i64,
    pub repair: i64,
    pub repair_amount: f32,
    pub larger_shot: i64,
}

impl Default for ShopPrices {
    fn default() -> Self {
        Self {
            fuel: 10,
            fuel_amount: 200.0,
            parachute: 15,
            repair: 20,
            repair_amount: 20.0,
            larger_shot: 20,
        }
    }
}

/// Complete session state
#[derive(Debug)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub terrain: TerrainField,
    pub wind: Wind,
    /// Live roster, sorted by symbol
    pub tanks: Vec<Tank>,
    pub projectiles: Vec<Projectile>,
    pub explosions: Vec<ExplosionEvent>,
    pub scores: ScoreTable,
    /// Index into `tanks` of the player whose turn it is
    pub current_player: usize,
    pub phase: GamePhase,
    pub shop: ShopPrices,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    levels: LevelManager,
    /// Players knocked out of the current level
    destroyed_players: BTreeSet<char>,
    /// A shot was fired this tick; hand over the turn once it resolves
    turn_pending: bool,
}

impl GameState {
    /// Start a session and load the first level
    pub fn new(seed: u64, provider: Box<dyn LevelProvider>) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let wind = Wind::new(&mut rng);
        let mut state = Self {
            seed,
            rng,
            terrain: TerrainField::default(),
            wind,
            tanks: Vec::new(),
            projectiles: Vec::new(),
            explosions: Vec::new(),
            scores: ScoreTable::new(),
            current_player: 0,
            phase: GamePhase::AwaitingAction,
            shop: ShopPrices::default(),
            time_ticks: 0,
            events: Vec::new(),
            levels: LevelManager::new(provider),
            destroyed_players: BTreeSet::new(),
            turn_pending: false,
        };
        state.load_next_level();
        state
    }

    pub fn with_levels(seed: u64, levels: Vec<LevelDescriptor>) -> Self {
        Self::new(seed, Box::new(levels))
    }

    pub fn with_shop(mut self, shop: ShopPrices) -> Self {
        self.shop = shop;
        self
    }

    pub fn current_tank(&self) -> Option<&Tank> {
        self.tanks.get(self.current_player)
    }

    fn acting_tank_mut(&mut self) -> Option<&mut Tank> {
        if self.phase != GamePhase::AwaitingAction {
            return None;
        }
        self.tanks.get_mut(self.current_player).filter(|t| t.is_alive())
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Highest scorer (ties go to the lowest symbol)
    pub fn winner(&self) -> Option<char> {
        self.scores.winner()
    }

    /// 1-based number of the level being played
    pub fn level_number(&self) -> usize {
        self.levels.levels_loaded()
    }

    pub fn level_count(&self) -> usize {
        self.levels.level_count()
    }

    pub fn destroyed_players(&self) -> &BTreeSet<char> {
        &self.destroyed_players
    }

    // === Player actions ===

    /// Drive the current tank by `dx` pixels
    pub fn move_current(&mut self, dx: f32) -> bool {
        let Some(tank) = self.tanks.get_mut(self.current_player) else {
            return false;
        };
        if self.phase != GamePhase::AwaitingAction || !tank.is_alive() {
            return false;
        }
        tank.move_by(dx, &self.terrain)
    }

    pub fn aim_current(&mut self, delta: f32) {
        if let Some(tank) = self.acting_tank_mut() {
            tank.adjust_turret(delta);
        }
    }

    pub fn adjust_power_current(&mut self, step: f32) {
        if let Some(tank) = self.acting_tank_mut() {
            tank.adjust_power(step);
        }
    }

    /// Spend score on an upgrade for the current tank. Silently refused when
    /// the player cannot afford it or it would be wasted.
    pub fn purchase(&mut self, item: Purchase) -> bool {
        let shop = self.shop;
        let Some(tank) = self.tanks.get(self.current_player) else {
            return false;
        };
        if self.phase != GamePhase::AwaitingAction || !tank.is_alive() {
            return false;
        }
        let (cost, allowed) = match item {
            Purchase::Fuel => (shop.fuel, tank.fuel() + shop.fuel_amount <= MAX_FUEL),
            Purchase::Parachute => (shop.parachute, true),
            Purchase::Repair => (shop.repair, tank.health() + shop.repair_amount <= MAX_HEALTH),
            Purchase::LargerShot => (shop.larger_shot, !tank.larger_shot_ready()),
        };
        let symbol = tank.symbol;
        if !allowed || !self.scores.try_spend(symbol, cost, cost) {
            return false;
        }

        let tank = &mut self.tanks[self.current_player];
        match item {
            Purchase::Fuel => tank.add_fuel(shop.fuel_amount),
            Purchase::Parachute => tank.add_parachute(),
            Purchase::Repair => tank.repair(shop.repair_amount),
            Purchase::LargerShot => tank.arm_larger_shot(),
        }
        self.events.push(GameEvent::Purchased { player: symbol, item });
        true
    }

    /// Fire the current tank's shell. The turn passes at the end of the tick.
    pub fn fire(&mut self) -> bool {
        if self.turn_pending {
            return false;
        }
        let Some(tank) = self.acting_tank_mut() else {
            return false;
        };
        let radius = tank.take_shot_radius();
        let projectile = Projectile::launch(
            tank.muzzle(),
            tank.turret_angle(),
            tank.power(),
            tank.symbol,
            radius,
            tank.colour,
        );
        let player = tank.symbol;
        self.projectiles.push(projectile);
        self.turn_pending = true;
        self.events.push(GameEvent::ShotFired { player, radius });
        true
    }

    /// Full session reset: scores, roster and level cursor
    pub fn restart(&mut self) {
        log::info!("Restarting session");
        self.events.clear();
        self.scores.clear();
        self.tanks.clear();
        self.projectiles.clear();
        self.explosions.clear();
        self.turn_pending = false;
        self.levels.restart();
        self.wind = Wind::new(&mut self.rng);
        self.load_next_level();
    }

    // === Tick phases (driven by `tick`) ===

    pub(crate) fn begin_tick(&mut self) {
        self.events.clear();
        self.time_ticks += 1;
    }

    /// Falling, parachutes and playfield exits
    pub(crate) fn update_tanks(&mut self, dt: f32) {
        for tank in &mut self.tanks {
            let Some(event) = tank.update(dt, &self.terrain) else {
                continue;
            };
            let symbol = tank.symbol;
            self.events.push(match event {
                TankEvent::ParachuteDeployed => GameEvent::ParachuteDeployed { symbol },
                TankEvent::Landed { parachutes_left } => GameEvent::TankLanded {
                    symbol,
                    parachutes_left,
                },
                TankEvent::Destroyed(cause) => {
                    log::info!("Tank {} lost ({:?})", symbol, cause);
                    GameEvent::TankDestroyed { symbol, cause }
                }
            });
        }
    }

    /// Step every projectile, then resolve the impacts in order
    pub(crate) fn update_projectiles(&mut self, dt: f32) {
        for explosion in &mut self.explosions {
            explosion.advance(dt);
        }
        self.explosions.retain(|e| !e.is_finished());

        let impacts: Vec<Impact> = self
            .projectiles
            .iter_mut()
            .filter_map(|p| p.step(&self.terrain, &self.wind))
            .collect();
        self.projectiles.retain(|p| !p.should_remove());

        for impact in impacts {
            self.resolve_impact(impact);
        }
    }

    fn resolve_impact(&mut self, impact: Impact) {
        let outcome = combat::explode(impact, &mut self.tanks, &mut self.scores, &mut self.terrain);
        for hit in &outcome.hits {
            self.events.push(GameEvent::TankDamaged {
                symbol: hit.symbol,
                damage: hit.damage,
                by: impact.owner,
            });
            if hit.killed {
                self.events.push(GameEvent::TankDestroyed {
                    symbol: hit.symbol,
                    cause: DestroyCause::Killed,
                });
            }
        }
        self.explosions.extend(outcome.explosions);
    }

    /// Second phase of resolution: drop destroyed tanks, then either move to
    /// the next level or hand over the turn
    pub(crate) fn finish_tick(&mut self) {
        let before = self.tanks.len();
        for tank in self.tanks.iter().filter(|t| !t.is_alive()) {
            self.destroyed_players.insert(tank.symbol);
        }
        self.tanks.retain(Tank::is_alive);
        if self.tanks.len() != before {
            log::debug!("Removed {} tank(s)", before - self.tanks.len());
        }

        let turn_pending = std::mem::take(&mut self.turn_pending);
        if self.tanks.len() <= 1 {
            self.phase = GamePhase::LevelTransition;
            self.load_next_level();
        } else if turn_pending {
            self.advance_turn();
        } else {
            self.current_player %= self.tanks.len();
        }
    }

    fn advance_turn(&mut self) {
        if self.tanks.is_empty() {
            return;
        }
        self.current_player = (self.current_player + 1) % self.tanks.len();
        self.wind.tick(&mut self.rng);
        self.events.push(GameEvent::TurnChanged {
            player: self.tanks[self.current_player].symbol,
            wind: self.wind.strength(),
        });
    }

    fn load_next_level(&mut self) {
        self.destroyed_players.clear();
        self.tanks.clear();
        self.projectiles.clear();
        self.turn_pending = false;
        self.current_player = 0;

        let Some(level) = self.levels.advance() else {
            self.end_game();
            return;
        };

        self.terrain = TerrainField::from_layout(&level.layout, &mut self.rng);
        self.tanks = self.place_tanks(&level.layout.players(), &level.player_colours);
        for tank in &self.tanks {
            self.scores.register(tank.symbol);
        }
        self.phase = GamePhase::AwaitingAction;

        let number = self.levels.levels_loaded();
        log::info!(
            "Level {}/{} loaded with {} tanks",
            number,
            self.levels.level_count(),
            self.tanks.len()
        );
        self.events.push(GameEvent::LevelStarted { level: number });
    }

    fn place_tanks(
        &mut self,
        players: &[(char, usize)],
        colours: &BTreeMap<char, ColourSpec>,
    ) -> Vec<Tank> {
        let mut players = players.to_vec();
        players.sort_by_key(|(symbol, _)| *symbol);
        players.dedup_by(|later, first| {
            let duplicate = later.0 == first.0;
            if duplicate {
                log::warn!("Duplicate player marker {}, keeping the first", later.0);
            }
            duplicate
        });

        players
            .into_iter()
            .map(|(symbol, col)| {
                let colour = match colours.get(&symbol) {
                    Some(spec) => spec.resolve(&mut self.rng),
                    None => {
                        log::warn!("No colour defined for player {}, using white", symbol);
                        Rgb::WHITE
                    }
                };
                Tank::new(symbol, (col * CELL_SIZE) as f32, colour, &self.terrain)
            })
            .collect()
    }

    fn end_game(&mut self) {
        self.phase = GamePhase::GameOver;
        let winner = self.scores.winner();
        match winner {
            Some(symbol) => log::info!("Game over, player {} wins", symbol),
            None => log::info!("Game over, no scores recorded"),
        }
        self.events.push(GameEvent::GameOver { winner });
    }
}
