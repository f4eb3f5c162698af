//! Invariants that must hold for any input sequence

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use tanks_duel::Rgb;
use tanks_duel::ScoreTable;
use tanks_duel::consts::*;
use tanks_duel::sim::{LayoutGrid, Tank, TerrainField, Wind};

/// Random layout text: up to 20 rows of up to 28 cells
fn layout_text() -> impl Strategy<Value = String> {
    prop::collection::vec("[ XT]{0,28}", 0..20).prop_map(|rows| rows.join("\n"))
}

proptest! {
    #[test]
    fn terrain_heights_stay_in_bounds(text in layout_text(), seed in any::<u64>()) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let terrain = TerrainField::from_layout(&LayoutGrid::parse(&text), &mut rng);
        prop_assert_eq!(terrain.columns(), TERRAIN_COLUMNS);
        for &h in terrain.heights() {
            prop_assert!((0..=WORLD_HEIGHT).contains(&h));
        }
        for tree in terrain.trees() {
            prop_assert!((-30..=30).contains(&tree.offset));
        }
    }

    #[test]
    fn craters_only_deepen(
        text in layout_text(),
        blasts in prop::collection::vec((-100.0f32..1000.0, 1.0f32..80.0), 1..8),
    ) {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut terrain = TerrainField::from_layout(&LayoutGrid::parse(&text), &mut rng);
        for (x, radius) in blasts {
            let before = terrain.heights().to_vec();
            terrain.deform(x, radius);
            for (old, new) in before.iter().zip(terrain.heights()) {
                prop_assert!(new >= old);
                prop_assert!(*new <= WORLD_HEIGHT);
            }
        }
    }

    #[test]
    fn power_never_exceeds_health(ops in prop::collection::vec((0u8..3, 0.0f32..40.0), 0..50)) {
        let terrain = TerrainField::flat(TERRAIN_COLUMNS, WORLD_HEIGHT, 400);
        let mut tank = Tank::new('A', 100.0, Rgb::WHITE, &terrain);
        for (op, amount) in ops {
            match op {
                0 => tank.receive_damage(amount),
                1 => tank.adjust_power(amount),
                _ => tank.adjust_power(-amount),
            }
            prop_assert!(tank.power() >= 0.0);
            prop_assert!(tank.power() <= tank.health());
            prop_assert!(tank.health() >= 0.0);
        }
    }

    #[test]
    fn fuel_pays_for_distance(moves in prop::collection::vec(-60.0f32..60.0, 0..40)) {
        let terrain = TerrainField::flat(TERRAIN_COLUMNS, WORLD_HEIGHT, 400);
        let mut tank = Tank::new('A', 400.0, Rgb::WHITE, &terrain);
        for dx in moves {
            let (x, fuel) = (tank.x, tank.fuel());
            if tank.move_by(dx, &terrain) {
                prop_assert!((fuel - tank.fuel() - dx.abs()).abs() < 1e-3);
                prop_assert!((tank.x - x - dx).abs() < 1e-3);
            } else {
                prop_assert_eq!(tank.x, x);
                prop_assert_eq!(tank.fuel(), fuel);
            }
            prop_assert!(tank.fuel() >= 0.0);
            prop_assert!((0.0..=PLAYFIELD_WIDTH).contains(&tank.x));
        }
    }

    #[test]
    fn wind_stays_bounded(seed in any::<u64>(), turns in 0usize..300) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut wind = Wind::new(&mut rng);
        for _ in 0..turns {
            let before = wind.strength();
            wind.tick(&mut rng);
            prop_assert!((-WIND_LIMIT..=WIND_LIMIT).contains(&wind.strength()));
            prop_assert!((wind.strength() - before).abs() <= WIND_MAX_DELTA);
        }
    }

    #[test]
    fn scores_never_go_negative(ops in prop::collection::vec((any::<bool>(), -50i64..50), 0..60)) {
        let mut scores = ScoreTable::new();
        for (spend, amount) in ops {
            if spend {
                let cost = amount.abs();
                scores.try_spend('A', cost, cost);
            } else {
                scores.credit('A', amount);
            }
            prop_assert!(scores.get('A') >= 0);
        }
    }

    #[test]
    fn falling_tank_spends_at_most_one_parachute(drop in 1i32..300) {
        let high = TerrainField::flat(TERRAIN_COLUMNS, WORLD_HEIGHT, 200);
        let mut tank = Tank::new('A', 300.0, Rgb::WHITE, &high);
        let low = TerrainField::flat(TERRAIN_COLUMNS, WORLD_HEIGHT, 200 + drop);
        for _ in 0..400 {
            tank.update(SIM_DT, &low);
        }
        prop_assert!(tank.is_alive());
        prop_assert_eq!(tank.parachutes(), START_PARACHUTES - 1);
        prop_assert_eq!(tank.y, (200 + drop) as f32);
    }
}
