//! Procedural row generation
//!
//! Rows are produced one at a time, furthest-ahead last, from a read-only
//! view of the rows behind them. Every land row is repaired so that any
//! grass the player can stand on in the previous land row leads to grass in
//! the new one; rivers are crossed by raft, so a land row landing after a
//! river must offer grass wherever the previous land row did.
//!
//! Grass always wins over rock when rules disagree.

use rand::Rng;

use super::raft::{Drift, Raft, WaterRowMeta};
use super::tile::{Row, RowLookup, TileKind};
use crate::Settings;
use crate::consts::*;

/// A generated row plus any rafts spawned on it
#[derive(Debug, Clone)]
pub struct RowResult {
    pub row: Row,
    pub rafts: Vec<Raft>,
}

/// Generation tuning, captured from [`Settings`] when a session starts
#[derive(Debug, Clone)]
pub struct RowGenerator {
    width: i32,
    spawn_column: i32,
    water_chance: f64,
    rock_chance: f64,
    rafts_enabled: bool,
    speed_range: (f32, f32),
    count_range: (u32, u32),
    raft_width_range: (u32, u32),
}

impl RowGenerator {
    pub fn new(settings: &Settings) -> Self {
        Self {
            width: settings.field_width,
            spawn_column: settings.spawn_column,
            water_chance: settings.water_chance,
            rock_chance: settings.rock_chance,
            rafts_enabled: settings.rafts_enabled,
            speed_range: (settings.raft_speed_min, settings.raft_speed_max),
            count_range: (settings.rafts_per_row_min, settings.rafts_per_row_max),
            raft_width_range: (settings.raft_width_min, settings.raft_width_max),
        }
    }

    /// Produce row `row` given the rows already generated
    pub fn generate<R: Rng + ?Sized>(
        &self,
        row: i32,
        lookup: &impl RowLookup,
        rng: &mut R,
    ) -> RowResult {
        if (ROCK_BAND_FIRST..=ROCK_BAND_LAST).contains(&row) {
            return RowResult {
                row: Row::land(vec![TileKind::Rock; self.width as usize]),
                rafts: Vec::new(),
            };
        }

        // Never two rivers in a row. The forward neighbor only exists when
        // an evicted row is being regenerated.
        let forced_land = row == 0
            || row == -1
            || lookup.is_water_row(row + 1)
            || lookup.is_water_row(row - 1);

        if !forced_land && rng.random_bool(self.water_chance) {
            self.river(row, rng)
        } else {
            RowResult {
                row: Row::land(self.land(row, lookup, rng)),
                rafts: Vec::new(),
            }
        }
    }

    fn river<R: Rng + ?Sized>(&self, row: i32, rng: &mut R) -> RowResult {
        let direction = if rng.random_bool(0.5) {
            Drift::Right
        } else {
            Drift::Left
        };
        let speed = rng.random_range(self.speed_range.0..self.speed_range.1);
        let meta = WaterRowMeta {
            row,
            direction,
            speed,
        };

        let rafts = if self.rafts_enabled {
            self.spawn_rafts(&meta, rng)
        } else {
            Vec::new()
        };
        log::debug!(
            "River at row {} ({:?}, speed {:.3}, {} rafts)",
            row,
            direction,
            speed,
            rafts.len()
        );

        RowResult {
            row: Row::river(self.width, meta),
            rafts,
        }
    }

    /// Evenly spaced rafts, each jittered inside its own slot
    fn spawn_rafts<R: Rng + ?Sized>(&self, meta: &WaterRowMeta, rng: &mut R) -> Vec<Raft> {
        let count = rng.random_range(self.count_range.0..=self.count_range.1);
        let spacing = self.width as f32 / count as f32;

        (0..count)
            .map(|i| {
                let width = rng.random_range(self.raft_width_range.0..=self.raft_width_range.1);
                let slack = spacing - width as f32;
                let offset = if slack > 0.0 {
                    rng.random_range(0.0..slack)
                } else {
                    0.0
                };
                Raft::new(meta, i as f32 * spacing + offset, width)
            })
            .collect()
    }

    fn land<R: Rng + ?Sized>(
        &self,
        row: i32,
        lookup: &impl RowLookup,
        rng: &mut R,
    ) -> Vec<TileKind> {
        let mut tiles: Vec<TileKind> = (0..self.width)
            .map(|_| {
                if rng.random_bool(self.rock_chance) {
                    TileKind::Rock
                } else {
                    TileKind::Grass
                }
            })
            .collect();

        if !tiles.contains(&TileKind::Grass) {
            let column = rng.random_range(0..tiles.len());
            tiles[column] = TileKind::Grass;
        }

        self.repair_connectivity(row, &mut tiles, lookup);

        match row {
            0 => {
                let lo = (self.spawn_column - 1).max(0);
                let hi = (self.spawn_column + 1).min(self.width - 1);
                for c in lo..=hi {
                    tiles[c as usize] = TileKind::Grass;
                }
            }
            -1 => tiles[self.spawn_column as usize] = TileKind::Grass,
            _ => {}
        }

        tiles
    }

    /// Make every grass column of the nearest land row behind reachable
    fn repair_connectivity(&self, row: i32, tiles: &mut [TileKind], lookup: &impl RowLookup) {
        for depth in 1..=CONNECTIVITY_LOOKBACK {
            let Some(prev) = lookup.row(row + depth) else {
                // No history this far back
                return;
            };
            if prev.is_water() {
                continue;
            }

            for c in prev.grass_columns() {
                if depth == 1 {
                    let lo = (c - 1).max(0) as usize;
                    let hi = (c + 1).min(self.width - 1) as usize;
                    if !tiles[lo..=hi].contains(&TileKind::Grass) {
                        tiles[c as usize] = TileKind::Grass;
                    }
                } else {
                    // Raft riders can step off anywhere
                    tiles[c as usize] = TileKind::Grass;
                }
            }
            return;
        }
    }
}
