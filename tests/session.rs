//! Whole-session scenarios through the public API

use std::fs;
use std::path::PathBuf;

use glam::Vec2;
use tanks_duel::consts::*;
use tanks_duel::input::{Key, input_for_key};
use tanks_duel::sim::{
    DestroyCause, GameEvent, GamePhase, GameState, LayoutGrid, LevelDescriptor, Projectile,
    TickInput, tick,
};
use tanks_duel::{GameConfig, Rgb};

/// A at x=128, B at x=640, both on a flat shelf at y=384
fn duel_level() -> LevelDescriptor {
    let mut rows = vec![String::new(); 20];
    rows[11] = format!("{}A{}B", " ".repeat(4), " ".repeat(15));
    rows[12] = "X".repeat(28);
    LevelDescriptor::from_layout(LayoutGrid::parse(&rows.join("\n")))
}

/// A shell that hits the ground at `x` on its first step
fn shell_at(x: f32, y: f32, owner: char, radius: f32) -> Projectile {
    Projectile::new(Vec2::new(x, y), Vec2::ZERO, owner, radius, Rgb::WHITE)
}

fn idle(state: &mut GameState, ticks: usize) {
    for _ in 0..ticks {
        tick(state, &TickInput::default(), SIM_DT);
    }
}

#[test]
fn direct_hit_scores_digs_and_drops_target() {
    let mut state = GameState::with_levels(7, vec![duel_level()]);
    state.projectiles.push(shell_at(640.0, 384.0, 'A', SHOT_RADIUS));

    tick(&mut state, &TickInput::default(), SIM_DT);

    let b = &state.tanks[1];
    assert_eq!(b.health(), 40.0);
    assert_eq!(b.power(), 40.0);
    assert_eq!(state.scores.get('A'), 60);
    assert_eq!(state.terrain.height_at(640.0), 414);
    assert!(state.events.contains(&GameEvent::TankDamaged {
        symbol: 'B',
        damage: 60.0,
        by: 'A',
    }));
    assert_eq!(state.explosions.len(), 1);

    // B drifts down into the crater under a parachute
    idle(&mut state, 30);
    let b = &state.tanks[1];
    assert_eq!(b.y, 414.0);
    assert_eq!(b.parachutes(), START_PARACHUTES - 1);
    assert!(state.explosions.is_empty());
}

#[test]
fn kill_on_last_level_ends_game() {
    let mut state = GameState::with_levels(7, vec![duel_level()]);
    state.projectiles.push(shell_at(640.0, 384.0, 'A', SHOT_RADIUS));
    state.projectiles.push(shell_at(640.0, 384.0, 'A', SHOT_RADIUS));

    tick(&mut state, &TickInput::default(), SIM_DT);

    assert!(state.events.contains(&GameEvent::TankDestroyed {
        symbol: 'B',
        cause: DestroyCause::Killed,
    }));
    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.winner(), Some('A'));
    assert!(state.events.contains(&GameEvent::GameOver { winner: Some('A') }));
    assert_eq!(state.scores.get('A'), 120);

    // R restarts once the game is over
    let restart = input_for_key(Key::R, state.is_game_over());
    assert!(restart.restart);
    tick(&mut state, &restart, SIM_DT);
    assert_eq!(state.phase, GamePhase::AwaitingAction);
    assert_eq!(state.scores.get('A'), 0);
    assert_eq!(state.tanks.len(), 2);
}

#[test]
fn scores_carry_into_next_level() {
    let mut state = GameState::with_levels(7, vec![duel_level(), duel_level()]);
    state.projectiles.push(shell_at(640.0, 384.0, 'A', LARGER_SHOT_RADIUS));
    state.projectiles.push(shell_at(640.0, 384.0, 'A', SHOT_RADIUS));

    tick(&mut state, &TickInput::default(), SIM_DT);

    assert_eq!(state.level_number(), 2);
    assert!(state.events.contains(&GameEvent::LevelStarted { level: 2 }));
    assert_eq!(state.tanks.len(), 2);
    assert_eq!(state.tanks[1].health(), MAX_HEALTH);
    assert_eq!(state.current_player, 0);
    assert!(state.projectiles.is_empty());
    assert_eq!(state.scores.get('A'), 120);
}

#[test]
fn fired_shell_resolves_and_turn_passes() {
    let mut state = GameState::with_levels(11, vec![duel_level()]);
    tick(&mut state, &input_for_key(Key::Space, false), SIM_DT);
    assert_eq!(state.current_player, 1);
    assert_eq!(state.projectiles.len(), 1);

    idle(&mut state, 60);
    assert!(state.projectiles.is_empty());
    assert_eq!(state.current_player, 1);
    assert_eq!(state.tanks.len(), 2);
}

#[test]
fn keys_drive_the_current_tank() {
    let mut state = GameState::with_levels(3, vec![duel_level()]);
    for key in [Key::W, Key::W, Key::W, Key::S, Key::Up, Key::Right] {
        tick(&mut state, &input_for_key(key, false), SIM_DT);
    }
    let a = &state.tanks[0];
    assert_eq!(a.power(), 52.0);
    assert!((a.turret_angle() - (std::f32::consts::FRAC_PI_2 + 2.0 * AIM_STEP)).abs() < 1e-6);
    assert!(a.x > 128.0);
    assert!(a.fuel() < START_FUEL);
    // No purchase without score
    tick(&mut state, &input_for_key(Key::P, false), SIM_DT);
    assert_eq!(state.tanks[0].parachutes(), START_PARACHUTES);
}

#[test]
fn config_files_become_levels() {
    let dir = std::env::temp_dir().join(format!("tanks-duel-session-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let mut layout = "\n".repeat(11);
    layout.push_str("  A     T     B\n");
    layout.push_str(&"X".repeat(28));
    fs::write(dir.join("level1.txt"), layout).unwrap();
    let config_path: PathBuf = dir.join("config.json");
    fs::write(
        &config_path,
        r#"{
            "levels": [{ "layout": "level1.txt", "foreground-colour": "10,20,30" }],
            "player_colours": { "A": "0,0,255", "B": "random" },
            "shop": { "parachute": 5 }
        }"#,
    )
    .unwrap();

    let config = GameConfig::load(&config_path).unwrap();
    let levels = config.into_levels(&dir).unwrap();
    assert_eq!(levels.len(), 1);
    assert_eq!(levels[0].foreground, Rgb::new(10, 20, 30));

    let mut state = GameState::with_levels(1, levels).with_shop(config.shop);
    assert_eq!(state.shop.parachute, 5);
    assert_eq!(state.shop.fuel, 10);
    assert_eq!(state.tanks[0].colour, Rgb::new(0, 0, 255));
    assert_eq!(state.terrain.trees().len(), 1);

    state.scores.credit('A', 5);
    assert!(state.purchase(tanks_duel::sim::Purchase::Parachute));
    assert_eq!(state.scores.get('A'), 0);

    fs::remove_dir_all(&dir).ok();
}
