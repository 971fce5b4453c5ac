//! Tile grid storage
//!
//! The field is an unbounded column of rows, of which only a sliding window
//! is live at once. Rows are keyed by index in a `BTreeMap`, so eviction of
//! everything behind the player is a single `split_off`.

use std::collections::BTreeMap;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::raft::WaterRowMeta;
use crate::GameError;

/// What a single grid cell is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Grass,
    Rock,
    Water,
}

impl TileKind {
    /// Whether the player can ever stand here
    #[inline]
    pub fn is_walkable(self) -> bool {
        self != TileKind::Rock
    }
}

/// A tile as handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub column: i32,
    pub row: i32,
    pub kind: TileKind,
}

impl Tile {
    pub fn coord(&self) -> IVec2 {
        IVec2::new(self.column, self.row)
    }
}

/// One fully generated row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    /// One entry per column
    pub tiles: Vec<TileKind>,
    /// Present only on rivers
    pub water: Option<WaterRowMeta>,
}

impl Row {
    pub fn land(tiles: Vec<TileKind>) -> Self {
        Self { tiles, water: None }
    }

    pub fn river(width: i32, meta: WaterRowMeta) -> Self {
        Self {
            tiles: vec![TileKind::Water; width as usize],
            water: Some(meta),
        }
    }

    pub fn is_water(&self) -> bool {
        self.water.is_some()
    }

    /// Columns holding grass
    pub fn grass_columns(&self) -> impl Iterator<Item = i32> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, k)| **k == TileKind::Grass)
            .map(|(c, _)| c as i32)
    }
}

/// Read-only view of already generated rows, used by the row generator
pub trait RowLookup {
    /// Columns per row
    fn width(&self) -> i32;

    /// Row by index, if it is live
    fn row(&self, row: i32) -> Option<&Row>;

    fn has_row(&self, row: i32) -> bool {
        self.row(row).is_some()
    }

    fn is_water_row(&self, row: i32) -> bool {
        self.row(row).is_some_and(Row::is_water)
    }
}

/// Sparse window of generated rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileField {
    width: i32,
    rows: BTreeMap<i32, Row>,
}

impl TileField {
    pub fn new(width: i32) -> Self {
        Self {
            width,
            rows: BTreeMap::new(),
        }
    }

    /// Kind of the tile at (column, row)
    ///
    /// `Ok(None)` means the row is not live. A column outside the field is a
    /// caller bug and fails.
    pub fn kind_at(&self, column: i32, row: i32) -> Result<Option<TileKind>, GameError> {
        if !(0..self.width).contains(&column) {
            return Err(GameError::ColumnOutOfRange {
                column,
                width: self.width,
            });
        }
        Ok(self.rows.get(&row).map(|r| r.tiles[column as usize]))
    }

    /// Store a freshly generated row
    pub fn insert_row(&mut self, row: i32, data: Row) -> Result<(), GameError> {
        if self.rows.contains_key(&row) {
            return Err(GameError::RowAlreadyGenerated(row));
        }
        if data.tiles.len() != self.width as usize {
            return Err(GameError::RowWidthMismatch {
                row,
                expected: self.width,
                got: data.tiles.len(),
            });
        }
        self.rows.insert(row, data);
        Ok(())
    }

    /// Smallest (furthest ahead) live row index
    pub fn min_row(&self) -> Option<i32> {
        self.rows.keys().next().copied()
    }

    /// Largest (furthest behind) live row index
    pub fn max_row(&self) -> Option<i32> {
        self.rows.keys().next_back().copied()
    }

    /// Drop every row with index >= `from`; returns how many were removed
    pub fn evict_from(&mut self, from: i32) -> usize {
        let evicted = self.rows.split_off(&from);
        evicted.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// All live tiles in row order (furthest ahead first), then column order
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.rows.iter().flat_map(|(&row, data)| {
            data.tiles.iter().enumerate().map(move |(c, &kind)| Tile {
                column: c as i32,
                row,
                kind,
            })
        })
    }

    /// Live rows with their indices
    pub fn rows(&self) -> impl Iterator<Item = (i32, &Row)> + '_ {
        self.rows.iter().map(|(&i, r)| (i, r))
    }
}

impl RowLookup for TileField {
    fn width(&self) -> i32 {
        self.width
    }

    fn row(&self, row: i32) -> Option<&Row> {
        self.rows.get(&row)
    }
}
