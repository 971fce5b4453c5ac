use lane_hopper::consts::*;
use lane_hopper::sim::{
    Drift, GameState, MoveOutcome, Raft, RaftSystem, RowGenerator, RowLookup, TileField,
    TileKind, WaterRowMeta, apply_intent, tick,
};
use lane_hopper::{Direction, Settings};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Generate rows `first..=last` (descending) without ever evicting
fn build_field(settings: &Settings, seed: u64, first: i32, last: i32) -> (TileField, RaftSystem) {
    let generator = RowGenerator::new(settings);
    let mut field = TileField::new(settings.field_width);
    let mut rafts = RaftSystem::new();
    let mut rng = Pcg32::seed_from_u64(seed);
    for row in (last..=first).rev() {
        let result = generator.generate(row, &field, &mut rng);
        field.insert_row(row, result.row).unwrap();
        rafts.insert(result.rafts);
    }
    (field, rafts)
}

fn grass(field: &TileField, row: i32) -> Vec<i32> {
    field.row(row).unwrap().grass_columns().collect()
}

fn in_rock_band(row: i32) -> bool {
    (ROCK_BAND_FIRST..=ROCK_BAND_LAST).contains(&row)
}

fn settings_strategy() -> impl Strategy<Value = Settings> {
    (1..32i32, 0.0..0.6f64, 0.0..0.95f64, any::<bool>()).prop_flat_map(
        |(width, water, rock, rafts)| {
            (0..width).prop_map(move |spawn| Settings {
                field_width: width,
                spawn_column: spawn,
                water_chance: water,
                rock_chance: rock,
                rafts_enabled: rafts,
                ..Default::default()
            })
        },
    )
}

const FIRST: i32 = TILES_BEHIND + ROW_MARGIN;
const LAST: i32 = -150;

proptest! {
    #[test]
    fn every_column_has_one_tile(settings in settings_strategy(), seed in any::<u64>()) {
        let (field, _) = build_field(&settings, seed, FIRST, LAST);
        for row in LAST..=FIRST {
            let data = field.row(row).unwrap();
            prop_assert_eq!(data.tiles.len(), settings.field_width as usize);
            for c in 0..settings.field_width {
                prop_assert!(field.kind_at(c, row).unwrap().is_some());
            }
        }
        prop_assert_eq!(field.tiles().count(), (FIRST - LAST + 1) as usize * settings.field_width as usize);
    }

    #[test]
    fn rivers_are_never_adjacent(settings in settings_strategy(), seed in any::<u64>()) {
        let (field, rafts) = build_field(&settings, seed, FIRST, LAST);
        for row in LAST..FIRST {
            prop_assert!(!(field.is_water_row(row) && field.is_water_row(row + 1)), "rows {} and {}", row, row + 1);
        }
        for raft in rafts.rafts() {
            prop_assert!(field.is_water_row(raft.row));
        }
        for (row, data) in field.rows() {
            if data.is_water() {
                prop_assert!(data.tiles.iter().all(|k| *k == TileKind::Water));
            } else {
                prop_assert!(!data.tiles.contains(&TileKind::Water), "water on land row {}", row);
            }
        }
    }

    #[test]
    fn land_rows_stay_connected(settings in settings_strategy(), seed in any::<u64>()) {
        let (field, _) = build_field(&settings, seed, FIRST, LAST);
        let width = settings.field_width;
        for row in LAST..FIRST {
            if in_rock_band(row) || field.is_water_row(row) {
                continue;
            }
            let here = grass(&field, row);
            prop_assert!(!here.is_empty());

            let Some(depth) = (1..=CONNECTIVITY_LOOKBACK)
                .take_while(|d| field.has_row(row + d))
                .find(|d| !field.is_water_row(row + d))
            else {
                continue;
            };
            let prev = grass(&field, row + depth);
            for c in prev {
                if depth == 1 {
                    let lo = (c - 1).max(0);
                    let hi = (c + 1).min(width - 1);
                    prop_assert!((lo..=hi).any(|n| here.contains(&n)), "row {} col {} dead end", row, c);
                } else {
                    prop_assert!(here.contains(&c), "row {} col {} no landing", row, c);
                }
            }
        }
    }

    #[test]
    fn spawn_area_is_safe(settings in settings_strategy(), seed in any::<u64>()) {
        let (field, _) = build_field(&settings, seed, FIRST, -3);
        let spawn = settings.spawn_column;
        prop_assert_eq!(field.kind_at(spawn, 0).unwrap(), Some(TileKind::Grass));
        prop_assert_eq!(field.kind_at(spawn, -1).unwrap(), Some(TileKind::Grass));
        if settings.field_width > 1 {
            let left = spawn > 0 && field.kind_at(spawn - 1, 0).unwrap() == Some(TileKind::Grass);
            let right = spawn + 1 < settings.field_width
                && field.kind_at(spawn + 1, 0).unwrap() == Some(TileKind::Grass);
            prop_assert!(left || right);
        }
    }

    #[test]
    fn rafts_stay_in_wrap_range(
        start in -3.0..20.0f32,
        width in 2..=3u32,
        speed in RAFT_SPEED_MIN..RAFT_SPEED_MAX,
        right in any::<bool>(),
        steps in 1..3_000usize,
    ) {
        let meta = WaterRowMeta {
            row: -4,
            direction: if right { Drift::Right } else { Drift::Left },
            speed,
        };
        let field_width = FIELD_WIDTH as f32;
        let mut raft = Raft::new(&meta, start.max(-(width as f32)), width);
        for _ in 0..steps {
            raft.advance(field_width);
            prop_assert!(raft.position >= -(width as f32) && raft.position <= field_width, "position {}", raft.position);
        }
    }

    #[test]
    fn score_only_grows_on_new_depth(
        seed in any::<u64>(),
        moves in proptest::collection::vec((0..4usize, 0..30u32), 1..200),
    ) {
        let mut state = GameState::new(&Settings::default(), seed).unwrap();
        for (dir, frames) in moves {
            let before_score = state.score();
            let before_best = state.controller.highest_row;
            let outcome = apply_intent(&mut state, Direction::ALL[dir]).unwrap();
            match outcome {
                MoveOutcome::Advanced { row, score } => {
                    prop_assert_eq!(Direction::ALL[dir], Direction::Forward);
                    prop_assert!(row < before_best);
                    prop_assert_eq!(score, before_score + 1);
                }
                _ => {
                    prop_assert_eq!(state.score(), before_score);
                }
            }
            let after = state.score();
            for _ in 0..frames {
                tick(&mut state);
                prop_assert_eq!(state.score(), after);
            }
            if state.is_game_over() {
                break;
            }
        }
    }

    #[test]
    fn same_seed_same_run(seed in any::<u64>(), moves in proptest::collection::vec(0..4usize, 1..60)) {
        let mut a = GameState::new(&Settings::default(), seed).unwrap();
        let mut b = GameState::new(&Settings::default(), seed).unwrap();
        for dir in moves {
            let oa = apply_intent(&mut a, Direction::ALL[dir]).unwrap();
            let ob = apply_intent(&mut b, Direction::ALL[dir]).unwrap();
            prop_assert_eq!(oa, ob);
            for _ in 0..5 {
                tick(&mut a);
                tick(&mut b);
            }
        }
        let (sa, sb) = (a.snapshot(0), b.snapshot(0));
        prop_assert_eq!(sa.tiles, sb.tiles);
        prop_assert_eq!(sa.rafts, sb.rafts);
        prop_assert_eq!(sa.player, sb.player);
        prop_assert_eq!(sa.score, sb.score);
    }
}
