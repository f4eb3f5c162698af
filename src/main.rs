//! Tanks Duel - headless driver
//!
//! Usage: `tanks-duel [config.json] [--seed N]`
//!
//! Reads one command per line from stdin: a key name (`left`, `right`,
//! `up`, `down`, `w`, `s`, `f`, `p`, `r`, `x`, `space`/`fire`), `tick N`
//! to advance idle ticks, `status` or `quit`.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use tanks_duel::GameConfig;
use tanks_duel::consts::SIM_DT;
use tanks_duel::input::{Key, input_for_key};
use tanks_duel::sim::{GameEvent, GameState, TickInput, tick};

const DEFAULT_CONFIG: &str = "config.json";

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = parse_seed(&args).unwrap_or_else(system_seed);
    let config_path = parse_config_path(&args);

    let config = match GameConfig::load(&config_path) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let base_dir = config_path.parent().unwrap_or(Path::new("."));
    let levels = match config.into_levels(base_dir) {
        Ok(levels) => levels,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    log::info!("Tanks Duel starting (seed {seed})");
    let mut state = GameState::with_levels(seed, levels).with_shop(config.shop);
    report(&state);
    print_status(&state);

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                log::error!("stdin: {err}");
                return ExitCode::FAILURE;
            }
        };
        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (None, _) => continue,
            (Some("quit"), _) => break,
            (Some("status"), _) => print_status(&state),
            (Some("tick"), count) => {
                let count = count.and_then(|c| c.parse::<u32>().ok()).unwrap_or(1);
                for _ in 0..count {
                    tick(&mut state, &TickInput::default(), SIM_DT);
                    report(&state);
                }
            }
            (Some(word), _) => match Key::parse(word) {
                Some(key) => {
                    let input = input_for_key(key, state.is_game_over());
                    tick(&mut state, &input, SIM_DT);
                    report(&state);
                }
                None => log::warn!("Unknown command {word:?}"),
            },
        }
    }

    print_standings(&state);
    ExitCode::SUCCESS
}

/// First argument that is neither `--seed` nor its value
fn parse_config_path(args: &[String]) -> PathBuf {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--seed" {
            iter.next();
            continue;
        }
        return PathBuf::from(arg);
    }
    PathBuf::from(DEFAULT_CONFIG)
}

fn parse_seed(args: &[String]) -> Option<u64> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--seed" {
            if let Some(value) = iter.next() {
                if let Ok(parsed) = value.parse::<u64>() {
                    return Some(parsed);
                }
            }
        }
    }
    None
}

fn system_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

/// Print the events of the last tick
fn report(state: &GameState) {
    for event in &state.events {
        match event {
            GameEvent::LevelStarted { level } => {
                println!("-- level {}/{} --", level, state.level_count());
            }
            GameEvent::TurnChanged { player, wind } => {
                println!("turn: {player} (wind {wind})");
            }
            GameEvent::ShotFired { player, radius } => println!("{player} fires (radius {radius})"),
            GameEvent::Purchased { player, item } => println!("{player} bought {item:?}"),
            GameEvent::TankDamaged { symbol, damage, by } => {
                println!("{symbol} took {damage:.1} damage from {by}");
            }
            GameEvent::TankDestroyed { symbol, cause } => println!("{symbol} destroyed ({cause:?})"),
            GameEvent::ParachuteDeployed { symbol } => println!("{symbol} deploys a parachute"),
            GameEvent::TankLanded { symbol, parachutes_left } => {
                println!("{symbol} landed ({parachutes_left} parachutes left)");
            }
            GameEvent::GameOver { winner } => {
                match winner {
                    Some(symbol) => println!("game over: {symbol} wins"),
                    None => println!("game over"),
                }
                print_standings(state);
            }
        }
    }
}

fn print_status(state: &GameState) {
    if state.is_game_over() {
        println!("game over ('r' restarts)");
        return;
    }
    println!(
        "level {}/{}  wind {}  tick {}",
        state.level_number(),
        state.level_count(),
        state.wind.strength(),
        state.time_ticks
    );
    for (i, tank) in state.tanks.iter().enumerate() {
        let marker = if i == state.current_player { '>' } else { ' ' };
        println!(
            "{marker} {} x={:.0} y={:.0} hp={:.0} power={:.0} fuel={:.0} chutes={} angle={:.2} score={}",
            tank.symbol,
            tank.x,
            tank.y,
            tank.health(),
            tank.power(),
            tank.fuel(),
            tank.parachutes(),
            tank.turret_angle(),
            state.scores.get(tank.symbol)
        );
    }
    println!("{} projectile(s) in flight", state.projectiles.len());
}

fn print_standings(state: &GameState) {
    println!("standings:");
    for standing in state.scores.standings() {
        println!("  {} {}", standing.symbol, standing.score);
    }
}
