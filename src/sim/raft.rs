//! Floating rafts on river rows
//!
//! Rafts drift at a constant per-row speed and wrap around the field edges.
//! A raft occupies the open interval `(position, position + width)` for
//! support checks: standing exactly on an edge is not standing on it.

use serde::{Deserialize, Serialize};

/// Drift direction of a river
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Drift {
    Left,
    Right,
}

impl Drift {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Drift::Left => -1.0,
            Drift::Right => 1.0,
        }
    }
}

/// Parameters shared by every raft on one river
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterRowMeta {
    pub row: i32,
    pub direction: Drift,
    /// Tiles per tick
    pub speed: f32,
}

impl WaterRowMeta {
    /// Signed displacement per tick
    #[inline]
    pub fn velocity(&self) -> f32 {
        self.speed * self.direction.sign()
    }
}

/// A raft entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raft {
    pub id: u32,
    /// Left edge, in tiles
    pub position: f32,
    pub row: i32,
    /// Length in tiles (2 or 3 by default)
    pub width: u32,
    pub direction: Drift,
    /// Tiles per tick
    pub speed: f32,
}

impl Raft {
    /// Raft on the river described by `meta`; the id is assigned on insert
    pub fn new(meta: &WaterRowMeta, position: f32, width: u32) -> Self {
        Self {
            id: 0,
            position,
            row: meta.row,
            width,
            direction: meta.direction,
            speed: meta.speed,
        }
    }

    /// Signed displacement per tick
    #[inline]
    pub fn velocity(&self) -> f32 {
        self.speed * self.direction.sign()
    }

    /// Right edge, in tiles
    #[inline]
    pub fn end(&self) -> f32 {
        self.position + self.width as f32
    }

    /// Strict containment; the edges themselves do not count
    #[inline]
    pub fn contains(&self, x: f32) -> bool {
        self.position < x && x < self.end()
    }

    /// Move one tick; returns true if the raft wrapped around
    pub fn advance(&mut self, field_width: f32) -> bool {
        self.position += self.velocity();
        match self.direction {
            Drift::Right if self.position >= field_width => {
                self.position = -(self.width as f32);
                true
            }
            Drift::Left if self.end() <= 0.0 => {
                self.position = field_width;
                true
            }
            _ => false,
        }
    }
}

/// Owns every live raft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaftSystem {
    rafts: Vec<Raft>,
    next_id: u32,
}

impl Default for RaftSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl RaftSystem {
    pub fn new() -> Self {
        Self {
            rafts: Vec::new(),
            next_id: 1,
        }
    }

    /// Take ownership of newly spawned rafts, assigning ids
    pub fn insert(&mut self, rafts: impl IntoIterator<Item = Raft>) {
        for mut raft in rafts {
            raft.id = self.next_id;
            self.next_id += 1;
            self.rafts.push(raft);
        }
    }

    /// Drift every raft one tick
    pub fn advance(&mut self, field_width: i32) {
        let field_width = field_width as f32;
        for raft in &mut self.rafts {
            if raft.advance(field_width) {
                log::trace!("Raft {} on row {} wrapped to {}", raft.id, raft.row, raft.position);
            }
        }
    }

    /// Raft on `row` whose interior contains `x`
    pub fn raft_at(&self, row: i32, x: f32) -> Option<&Raft> {
        self.rafts.iter().find(|r| r.row == row && r.contains(x))
    }

    /// Drop rafts on rows >= `from`
    pub fn evict_from(&mut self, from: i32) -> usize {
        let before = self.rafts.len();
        self.rafts.retain(|r| r.row < from);
        before - self.rafts.len()
    }

    pub fn rafts(&self) -> &[Raft] {
        &self.rafts
    }

    pub fn len(&self) -> usize {
        self.rafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rafts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(direction: Drift, speed: f32) -> WaterRowMeta {
        WaterRowMeta {
            row: -3,
            direction,
            speed,
        }
    }

    #[test]
    fn test_contains_is_strict() {
        let raft = Raft::new(&meta(Drift::Right, 0.03), 5.0, 3);
        assert!(raft.contains(6.5));
        assert!(raft.contains(5.01));
        assert!(!raft.contains(5.0));
        assert!(!raft.contains(8.0));
    }

    #[test]
    fn test_right_wrap() {
        let mut raft = Raft::new(&meta(Drift::Right, 0.05), 19.97, 2);
        assert!(raft.advance(20.0));
        assert_eq!(raft.position, -2.0);
        assert!(!raft.advance(20.0));
        assert!((raft.position - -1.95).abs() < 1e-5);
    }

    #[test]
    fn test_left_wrap_waits_until_fully_gone() {
        let mut raft = Raft::new(&meta(Drift::Left, 0.04), -2.95, 3);
        // Still overlapping the field by a sliver
        assert!(!raft.advance(20.0));
        assert!(raft.advance(20.0));
        assert_eq!(raft.position, 20.0);
    }

    #[test]
    fn test_raft_at_filters_by_row() {
        let mut system = RaftSystem::new();
        system.insert([
            Raft::new(&meta(Drift::Right, 0.03), 5.0, 3),
            Raft::new(
                &WaterRowMeta {
                    row: -7,
                    direction: Drift::Left,
                    speed: 0.02,
                },
                5.0,
                2,
            ),
        ]);
        assert_eq!(system.raft_at(-3, 6.5).map(|r| r.id), Some(1));
        assert_eq!(system.raft_at(-7, 6.5).map(|r| r.id), Some(2));
        assert!(system.raft_at(-3, 8.5).is_none());
        assert!(system.raft_at(-4, 6.5).is_none());
    }

    #[test]
    fn test_default_ids_start_at_one() {
        let mut system = RaftSystem::default();
        assert!(system.is_empty());
        system.insert([Raft::new(&meta(Drift::Left, 0.02), 1.0, 2)]);
        assert_eq!(system.rafts()[0].id, 1);
    }

    #[test]
    fn test_evict_from() {
        let mut system = RaftSystem::new();
        let near = WaterRowMeta {
            row: 2,
            ..meta(Drift::Right, 0.03)
        };
        system.insert([Raft::new(&near, 0.0, 2), Raft::new(&meta(Drift::Right, 0.03), 0.0, 2)]);
        assert_eq!(system.evict_from(0), 1);
        assert_eq!(system.len(), 1);
        assert_eq!(system.rafts()[0].row, -3);
    }
}
